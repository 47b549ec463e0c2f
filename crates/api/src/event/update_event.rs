use crate::error::PraxisError;
use crate::shared::conflict_detail;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::update_event::*;
use praxis_scheduler_domain::{
    find_conflict, local_stamp, to_instant, CalendarEvent, CandidateSpan, EventDraft, EventType,
    ID,
};
use praxis_scheduler_infra::PraxisContext;

pub async fn update_event_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let body = body.0;
    let usecase = UpdateEventUseCase {
        event_id: path_params.event_id,
        draft: EventDraft {
            event_type: body.event_type,
            title: body.title,
            location: body.location,
            notes: body.notes,
            surgery: body.surgery,
        },
        date: body.date,
        start_time: body.start_time,
        end_time: body.end_time,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(PraxisError::from)
}

#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub event_id: ID,
    pub draft: EventDraft,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidTimeSpan,
    InvalidSurgeryInfo,
    Conflict(String),
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::InvalidTimeSpan => Self::BadClientData(
                "The event has to start before it ends. Check the date and times.".into(),
            ),
            UseCaseError::InvalidSurgeryInfo => Self::BadClientData(
                "Only surgery events can carry payment information".into(),
            ),
            UseCaseError::Conflict(detail) => {
                Self::Conflict(format!("The timespan is already booked by {}", detail))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;

        let mut event = ctx
            .repos
            .events
            .find(self.event_id)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))?;

        if self.draft.surgery.is_some() && self.draft.event_type != EventType::Surgery {
            return Err(UseCaseError::InvalidSurgeryInfo);
        }

        let start = to_instant(&self.date, &self.start_time, &tz)
            .map_err(|_| UseCaseError::InvalidTimeSpan)?;
        let end = to_instant(&self.date, &self.end_time, &tz)
            .map_err(|_| UseCaseError::InvalidTimeSpan)?;
        if end <= start {
            return Err(UseCaseError::InvalidTimeSpan);
        }

        let events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let candidate = CandidateSpan::new(start, end);
        // proposing the unchanged interval must not trip on the event itself
        if let Some(existing) = find_conflict(&candidate, &events, Some(event.id), &tz) {
            return Err(UseCaseError::Conflict(conflict_detail(existing, &tz)));
        }

        let draft = self.draft.clone();
        event.event_type = draft.event_type;
        event.title = draft.title;
        event.location = draft.location;
        event.notes = draft.notes;
        event.surgery = draft.surgery;
        event.start_at = local_stamp(&self.date, &self.start_time);
        event.end_at = local_stamp(&self.date, &self.end_time);
        event.updated = ctx.sys.get_timestamp_millis();

        // editing one occurrence detaches it: the row keeps its series id
        // for traceability but regeneration will not touch it anymore
        if event.series_id.is_some() {
            event.is_override = true;
        }

        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}
