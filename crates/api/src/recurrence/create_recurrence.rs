use crate::error::PraxisError;
use crate::shared::conflict_detail;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::create_recurrence::*;
use praxis_scheduler_domain::{
    CalendarEvent, EventDraft, EventId, ExpandError, RecurrenceRule, WeeklyExpansion, ID,
};
use praxis_scheduler_infra::PraxisContext;
use std::collections::HashSet;

pub async fn create_recurrence_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let body = body.0;
    let usecase = CreateRecurrenceUseCase {
        draft: EventDraft {
            event_type: body.event_type,
            title: body.title,
            location: body.location,
            notes: body.notes,
            surgery: None,
        },
        rule: body.rule,
    };

    execute(usecase, &ctx)
        .await
        .map(|(series_id, events)| {
            HttpResponse::Created().json(APIResponse::new(series_id, events))
        })
        .map_err(PraxisError::from)
}

#[derive(Debug)]
pub struct CreateRecurrenceUseCase {
    pub draft: EventDraft,
    pub rule: RecurrenceRule,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotRecurrable,
    InvalidRule(String),
    Conflict { detail: String, at_date: String },
    TooManyOccurrences(usize),
    EmptyResult,
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotRecurrable => {
                Self::BadClientData("Only office visits can be made recurring".into())
            }
            UseCaseError::InvalidRule(detail) => {
                Self::BadClientData(format!("Invalid recurrence rule: {}", detail))
            }
            UseCaseError::Conflict { detail, at_date } => Self::Conflict(format!(
                "The series would collide on {} with {}",
                at_date, detail
            )),
            UseCaseError::TooManyOccurrences(cap) => Self::BadClientData(format!(
                "The recurrence would create more than {} events. Narrow the date range.",
                cap
            )),
            UseCaseError::EmptyResult => Self::BadClientData(
                "The recurrence matches no days. Check the weekdays and the date range.".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

pub(crate) fn expand_error(e: ExpandError, ctx: &PraxisContext) -> UseCaseError {
    match e {
        ExpandError::Conflict { event, at_date } => UseCaseError::Conflict {
            detail: conflict_detail(&event, &ctx.config.timezone),
            at_date,
        },
        ExpandError::TooMany { cap } => UseCaseError::TooManyOccurrences(cap),
        ExpandError::Empty => UseCaseError::EmptyResult,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateRecurrenceUseCase {
    type Response = (ID, Vec<CalendarEvent>);

    type Error = UseCaseError;

    const NAME: &'static str = "CreateRecurrence";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        if !self.draft.event_type.may_recur() {
            return Err(UseCaseError::NotRecurrable);
        }
        self.rule
            .validate()
            .map_err(|e| UseCaseError::InvalidRule(e.to_string()))?;

        let events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let series_id = ID::new();
        let exceptions = HashSet::new();
        let expansion = WeeklyExpansion {
            draft: &self.draft,
            rule: &self.rule,
            series_id,
            existing: &events,
            exceptions: &exceptions,
            max_occurrences: ctx.config.max_occurrences,
            now: ctx.sys.get_timestamp_millis(),
            timezone: ctx.config.timezone,
        };

        let mut new_id = || EventId::pending();
        let occurrences = expansion
            .expand(&mut new_id)
            .map_err(|e| expand_error(e, ctx))?;
        // an empty weekday set expands to nothing; for the user that is
        // the same dead end as a barren date range
        if occurrences.is_empty() {
            return Err(UseCaseError::EmptyResult);
        }

        let stored = ctx
            .repos
            .events
            .insert_many(&occurrences)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok((series_id, stored))
    }
}
