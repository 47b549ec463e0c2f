use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::get_events::*;
use praxis_scheduler_domain::{CalendarEvent, TimeSpan};
use praxis_scheduler_infra::PraxisContext;

pub async fn get_events_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let timespan = match (query_params.start_ts, query_params.end_ts) {
        (Some(start_ts), Some(end_ts)) => Some(TimeSpan::new(start_ts, end_ts)),
        _ => None,
    };
    let usecase = GetEventsUseCase { timespan };

    execute(usecase, &ctx)
        .await
        .map(|events| HttpResponse::Ok().json(APIResponse::new(events)))
        .map_err(PraxisError::from)
}

#[derive(Debug)]
pub struct GetEventsUseCase {
    pub timespan: Option<TimeSpan>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventsUseCase {
    type Response = Vec<CalendarEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvents";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;
        let mut events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if let Some(span) = self.timespan {
            events.retain(|event| match (event.start_ts(&tz), event.end_ts(&tz)) {
                (Some(start), Some(end)) => span.start() <= end && span.end() >= start,
                // rows with unreadable timestamps stay visible in the
                // unbounded listing only
                _ => false,
            });
        }

        // agenda order; rows with unreadable timestamps sink to the end
        events.sort_by_key(|event| match event.start_ts(&tz) {
            Some(start) => (0, start),
            None => (1, 0),
        });

        Ok(events)
    }
}
