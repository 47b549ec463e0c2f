use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::delete_occurrence::*;
use praxis_scheduler_domain::{CalendarEvent, RecurrenceException, ID};
use praxis_scheduler_infra::PraxisContext;

pub async fn delete_occurrence_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let usecase = DeleteOccurrenceUseCase {
        series_id: path_params.series_id,
        event_id: path_params.event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(PraxisError::from)
}

/// "Only this day": drops one occurrence of a series and records its day
/// in the exception ledger so a rebuild cannot bring it back.
#[derive(Debug)]
pub struct DeleteOccurrenceUseCase {
    pub series_id: ID,
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotInSeries(ID),
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::NotInSeries(event_id) => Self::BadClientData(format!(
                "The calendar event with id: {}, does not belong to this series.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteOccurrenceUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteOccurrence";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;

        let event = ctx
            .repos
            .events
            .find(self.event_id)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))?;
        if event.series_id != Some(self.series_id) {
            return Err(UseCaseError::NotInSeries(self.event_id));
        }

        // Overrides already left the series; deleting one needs no ledger
        // entry. Rows with unreadable timestamps have no day to record,
        // deleting them still works.
        if !event.is_override {
            if let Some(day) = event.day_key(&tz) {
                ctx.repos
                    .exceptions
                    .insert(&RecurrenceException::new(self.series_id, day))
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
        }

        ctx.repos
            .events
            .delete(self.event_id)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))
    }
}
