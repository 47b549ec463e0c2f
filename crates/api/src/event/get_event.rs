use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::get_event::*;
use praxis_scheduler_domain::{CalendarEvent, ID};
use praxis_scheduler_infra::PraxisContext;

pub async fn get_event_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let usecase = GetEventUseCase {
        event_id: path_params.event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(PraxisError::from)
}

#[derive(Debug)]
pub struct GetEventUseCase {
    pub event_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .events
            .find(self.event_id)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))
    }
}
