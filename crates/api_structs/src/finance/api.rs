use crate::dtos::CalendarEventDTO;
use crate::CalendarEventResponse;
use praxis_scheduler_domain::{FinanceReport, PaymentStatus, StatusFilter, ID};
use serde::{Deserialize, Serialize};

pub mod get_finance_report {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub year: i32,
        pub month: u32,
        pub status: Option<StatusFilter>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub pending_total: f64,
        pub paid_total: f64,
        pub entries: Vec<CalendarEventDTO>,
    }

    impl APIResponse {
        pub fn new(report: FinanceReport) -> Self {
            Self {
                pending_total: report.pending_total,
                paid_total: report.paid_total,
                entries: report
                    .entries
                    .into_iter()
                    .map(CalendarEventDTO::new)
                    .collect(),
            }
        }
    }
}

pub mod set_payment_status {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub payment_status: PaymentStatus,
    }

    pub type APIResponse = CalendarEventResponse;
}
