use crate::error::PraxisError;
use crate::shared::conflict_detail;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::create_event::*;
use praxis_scheduler_domain::{
    find_conflict, local_stamp, to_instant, CalendarEvent, CandidateSpan, EventDraft, EventId,
    EventType,
};
use praxis_scheduler_infra::PraxisContext;

pub async fn create_event_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let body = body.0;
    let usecase = CreateEventUseCase {
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
        .map(|event| HttpResponse::Created().json(APIResponse::new(event)))
        .map_err(PraxisError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub draft: EventDraft,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidTimeSpan,
    InvalidSurgeryInfo,
    Conflict(String),
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
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
impl UseCase for CreateEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        let tz = ctx.config.timezone;

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
        if let Some(existing) = find_conflict(&candidate, &events, None, &tz) {
            return Err(UseCaseError::Conflict(conflict_detail(existing, &tz)));
        }

        let event = self.draft.clone().into_event(
            EventId::pending(),
            local_stamp(&self.date, &self.start_time),
            local_stamp(&self.date, &self.end_time),
            ctx.sys.get_timestamp_millis(),
        );

        ctx.repos
            .events
            .insert(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
