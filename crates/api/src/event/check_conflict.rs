use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::check_conflict::*;
use praxis_scheduler_domain::{
    find_conflict, to_comparable_millis, CalendarEvent, CandidateSpan, EventId, ID,
};
use praxis_scheduler_infra::PraxisContext;

pub async fn check_conflict_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let body = body.0;
    let usecase = CheckConflictUseCase {
        start_at: body.start_at,
        end_at: body.end_at,
        exclude_event_id: body.exclude_event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|conflict| HttpResponse::Ok().json(APIResponse::new(conflict)))
        .map_err(PraxisError::from)
}

/// Dry-run probe behind the edit form's live conflict warning. A half
/// filled-in form is a normal state here, not an error.
#[derive(Debug)]
pub struct CheckConflictUseCase {
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub exclude_event_id: Option<ID>,
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
impl UseCase for CheckConflictUseCase {
    type Response = Option<CalendarEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "CheckConflict";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;
        let candidate = CandidateSpan {
            start: self
                .start_at
                .as_deref()
                .and_then(|s| to_comparable_millis(s, &tz)),
            end: self
                .end_at
                .as_deref()
                .and_then(|s| to_comparable_millis(s, &tz)),
        };

        let events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let exclude = self.exclude_event_id.map(EventId::Persisted);

        Ok(find_conflict(&candidate, &events, exclude, &tz).cloned())
    }
}
