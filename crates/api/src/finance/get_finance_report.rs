use crate::error::PraxisError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use praxis_scheduler_api_structs::get_finance_report::*;
use praxis_scheduler_domain::{build_finance_report, FinanceFilters, FinanceReport};
use praxis_scheduler_infra::PraxisContext;

pub async fn get_finance_report_controller(
    query_params: web::Query<QueryParams>,
    ctx: web::Data<PraxisContext>,
) -> Result<HttpResponse, PraxisError> {
    let usecase = GetFinanceReportUseCase {
        filters: FinanceFilters {
            year: query_params.year,
            month: query_params.month,
            status: query_params.status.unwrap_or_default(),
        },
    };

    execute(usecase, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
        .map_err(PraxisError::from)
}

/// Surgery payment report for one month. The filters always travel with
/// the request; there is no process-wide "current filters" state.
#[derive(Debug)]
pub struct GetFinanceReportUseCase {
    pub filters: FinanceFilters,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidMonth(u32),
    StorageError,
}

impl From<UseCaseError> for PraxisError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidMonth(month) => {
                Self::BadClientData(format!("{} is not a calendar month", month))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetFinanceReportUseCase {
    type Response = FinanceReport;

    type Error = UseCaseError;

    const NAME: &'static str = "GetFinanceReport";

    async fn execute(&mut self, ctx: &PraxisContext) -> Result<Self::Response, Self::Error> {
        if !(1..=12).contains(&self.filters.month) {
            return Err(UseCaseError::InvalidMonth(self.filters.month));
        }

        let events = ctx
            .repos
            .events
            .find_all()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(build_finance_report(
            &events,
            &self.filters,
            &ctx.config.timezone,
        ))
    }
}
