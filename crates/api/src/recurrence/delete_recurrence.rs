use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::delete_recurrence::*;
use praxis_scheduler_infra::PraxisContext;
use praxis_scheduler_domain::ID;

pub async fn delete_recurrence_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let usecase = DeleteRecurrenceUseCase {
        series_id: path_params.series_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|deleted_count| HttpResponse::Ok().json(APIResponse { deleted_count }))
        .map_err(PraxisError::from)
}

/// Removes a whole series: its regenerable rows and its exception
/// ledger. Override rows stay, they are the user's own events now.
/// Deleting an already-gone series is a no-op, not an error.
#[derive(Debug)]
pub struct DeleteRecurrenceUseCase {
    pub series_id: ID,
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
impl UseCase for DeleteRecurrenceUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteRecurrence";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        let deleted = ctx
            .repos
            .events
            .delete_by_series(self.series_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .exceptions
            .delete_by_series(self.series_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(deleted)
    }
}
