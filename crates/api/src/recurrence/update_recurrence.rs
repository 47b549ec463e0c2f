use super::create_recurrence::{expand_error, UseCaseError as ExpandUseCaseError};
use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::update_recurrence::*;
use praxis_scheduler_domain::{
    day_key_set, CalendarEvent, EventDraft, EventId, RecurrenceRule, WeeklyExpansion, ID,
};
use praxis_scheduler_infra::PraxisContext;

pub async fn update_recurrence_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let body = body.0;
    let usecase = UpdateRecurrenceUseCase {
        series_id: path_params.series_id,
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
        .map(|(series_id, events)| HttpResponse::Ok().json(APIResponse::new(series_id, events)))
        .map_err(PraxisError::from)
}

/// Rebuilds a series from its (possibly edited) rule: the regenerable
/// rows are dropped and fresh occurrences expanded in their place, with
/// the exception ledger still honored. Override rows are untouched.
#[derive(Debug)]
pub struct UpdateRecurrenceUseCase {
    pub series_id: ID,
    pub draft: EventDraft,
    pub rule: RecurrenceRule,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Expand(ExpandUseCaseError),
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(series_id) => Self::NotFound(format!(
                "The recurrence series with id: {}, was not found.",
                series_id
            )),
            UseCaseError::Expand(e) => e.into(),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateRecurrenceUseCase {
    type Response = (ID, Vec<CalendarEvent>);

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateRecurrence";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        if !self.draft.event_type.may_recur() {
            return Err(UseCaseError::Expand(ExpandUseCaseError::NotRecurrable));
        }
        self.rule
            .validate()
            .map_err(|e| UseCaseError::Expand(ExpandUseCaseError::InvalidRule(e.to_string())))?;

        let series_rows = ctx
            .repos
            .events
            .find_by_series(self.series_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if series_rows.is_empty() {
            return Err(UseCaseError::NotFound(self.series_id));
        }

        let all = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        // the rows about to be regenerated must not block their own rebuild
        let snapshot: Vec<CalendarEvent> = all
            .into_iter()
            .filter(|e| !e.is_regenerable(self.series_id))
            .collect();

        let ledger = ctx
            .repos
            .exceptions
            .find_by_series(self.series_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let exceptions = day_key_set(&ledger);

        let expansion = WeeklyExpansion {
            draft: &self.draft,
            rule: &self.rule,
            series_id: self.series_id,
            existing: &snapshot,
            exceptions: &exceptions,
            max_occurrences: ctx.config.max_occurrences,
            now: ctx.sys.get_timestamp_millis(),
            timezone: ctx.config.timezone,
        };

        let mut new_id = || EventId::pending();
        let occurrences = expansion
            .expand(&mut new_id)
            .map_err(|e| UseCaseError::Expand(expand_error(e, ctx)))?;
        if occurrences.is_empty() {
            return Err(UseCaseError::Expand(ExpandUseCaseError::EmptyResult));
        }

        // the expansion holds, now swap the rows
        ctx.repos
            .events
            .delete_by_series(self.series_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let stored = ctx
            .repos
            .events
            .insert_many(&occurrences)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok((self.series_id, stored))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::recurrence::create_recurrence::CreateRecurrenceUseCase;
    use praxis_scheduler_domain::{EventType, RecurrenceException, WeekDay};
    use praxis_scheduler_infra::setup_context;

    fn weekdays(days: &[u8]) -> Vec<WeekDay> {
        days.iter().map(|d| WeekDay::new(*d).unwrap()).collect()
    }

    fn draft() -> EventDraft {
        EventDraft {
            event_type: EventType::Office,
            title: Some("Office hours".into()),
            location: None,
            notes: None,
            surgery: None,
        }
    }

    fn rule(days: &[u8], start_time: &str, end_time: &str) -> RecurrenceRule {
        RecurrenceRule::weekly(
            weekdays(days),
            "2025-01-06",
            "2025-01-20",
            start_time,
            end_time,
        )
    }

    async fn seed_series(ctx: &PraxisContext) -> ID {
        let (series_id, _) = execute(
            CreateRecurrenceUseCase {
                draft: draft(),
                rule: rule(&[1, 3], "08:00", "09:00"),
            },
            ctx,
        )
        .await
        .unwrap();
        series_id
    }

    #[actix_web::test]
    async fn regenerates_rows_from_the_edited_rule() {
        let ctx = setup_context();
        let series_id = seed_series(&ctx).await;

        let (_, events) = execute(
            UpdateRecurrenceUseCase {
                series_id,
                draft: draft(),
                rule: rule(&[1], "10:00", "11:00"),
            },
            &ctx,
        )
        .await
        .unwrap();

        // Mondays only now: Jan 6, 13, 20
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.start_at.ends_with("T10:00:00")));
        assert_eq!(
            ctx.repos
                .events
                .find_by_series(series_id)
                .await
                .unwrap()
                .len(),
            3
        );
    }

    #[actix_web::test]
    async fn rebuild_honors_the_exception_ledger() {
        let ctx = setup_context();
        let series_id = seed_series(&ctx).await;
        ctx.repos
            .exceptions
            .insert(&RecurrenceException::new(series_id, "2025-01-13"))
            .await
            .unwrap();

        let (_, events) = execute(
            UpdateRecurrenceUseCase {
                series_id,
                draft: draft(),
                rule: rule(&[1, 3], "08:00", "09:00"),
            },
            &ctx,
        )
        .await
        .unwrap();

        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| !e.start_at.starts_with("2025-01-13")));
    }

    #[actix_web::test]
    async fn failed_rebuild_leaves_the_series_untouched() {
        let ctx = setup_context();
        let series_id = seed_series(&ctx).await;

        // a personal block at the new time on one of the Mondays
        let blocker = EventDraft {
            event_type: EventType::Personal,
            title: Some("Dentist".into()),
            location: None,
            notes: None,
            surgery: None,
        }
        .into_event(
            EventId::pending(),
            "2025-01-13T10:15:00".into(),
            "2025-01-13T10:45:00".into(),
            0,
        );
        ctx.repos.events.insert(&blocker).await.unwrap();

        let res = execute(
            UpdateRecurrenceUseCase {
                series_id,
                draft: draft(),
                rule: rule(&[1], "10:00", "11:00"),
            },
            &ctx,
        )
        .await;
        assert!(matches!(
            res.unwrap_err(),
            UseCaseError::Expand(ExpandUseCaseError::Conflict { .. })
        ));

        // the old rows are all still there
        let rows = ctx.repos.events.find_by_series(series_id).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|e| e.start_at.ends_with("T08:00:00")));
    }

    #[actix_web::test]
    async fn override_rows_survive_a_rebuild() {
        let ctx = setup_context();
        let series_id = seed_series(&ctx).await;

        let rows = ctx.repos.events.find_by_series(series_id).await.unwrap();
        let mut detached = rows[0].clone();
        detached.is_override = true;
        detached.start_at = "2025-01-06T14:00:00".into();
        detached.end_at = "2025-01-06T15:00:00".into();
        ctx.repos.events.save(&detached).await.unwrap();

        let (_, regenerated) = execute(
            UpdateRecurrenceUseCase {
                series_id,
                draft: draft(),
                rule: rule(&[3], "08:00", "09:00"),
            },
            &ctx,
        )
        .await
        .unwrap();
        // Wednesdays only: Jan 8, 15
        assert_eq!(regenerated.len(), 2);

        let rows = ctx.repos.events.find_by_series(series_id).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().any(|e| e.id == detached.id && e.is_override));
    }

    #[actix_web::test]
    async fn unknown_series_is_not_found() {
        let ctx = setup_context();
        let series_id = ID::new();

        let res = execute(
            UpdateRecurrenceUseCase {
                series_id,
                draft: draft(),
                rule: rule(&[1], "08:00", "09:00"),
            },
            &ctx,
        )
        .await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(series_id));
    }
}
