use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::set_payment_status::*;
use praxis_scheduler_domain::{CalendarEvent, PaymentStatus, ID};
use praxis_scheduler_infra::PraxisContext;

pub async fn set_payment_status_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let usecase = SetPaymentStatusUseCase {
        event_id: path_params.event_id,
        payment_status: body.payment_status,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| HttpResponse::Ok().json(APIResponse::new(event)))
        .map_err(PraxisError::from)
}

#[derive(Debug)]
pub struct SetPaymentStatusUseCase {
    pub event_id: ID,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    NotASurgery(ID),
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::NotASurgery(event_id) => Self::BadClientData(format!(
                "The calendar event with id: {}, has no payment to track.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SetPaymentStatusUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "SetPaymentStatus";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        let mut event = ctx
            .repos
            .events
            .find(self.event_id)
            .await
            .ok_or(UseCaseError::NotFound(self.event_id))?;

        match event.surgery.as_mut() {
            Some(surgery) => surgery.payment_status = self.payment_status,
            None => return Err(UseCaseError::NotASurgery(self.event_id)),
        }
        event.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .events
            .save(&event)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(event)
    }
}
