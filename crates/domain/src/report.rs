use crate::event::{CalendarEvent, EventType, PaymentStatus};
use chrono_tz::Tz;
use itertools::{Either, Itertools};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    All,
    Pending,
    Paid,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

/// Report window and status narrowing, passed explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceFilters {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub status: StatusFilter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinanceReport {
    /// Month totals, independent of the status narrowing below.
    pub pending_total: f64,
    pub paid_total: f64,
    /// The month's surgeries matching the status filter, newest first.
    pub entries: Vec<CalendarEvent>,
}

pub fn build_finance_report(
    events: &[CalendarEvent],
    filters: &FinanceFilters,
    tz: &Tz,
) -> FinanceReport {
    let month_prefix = format!("{:04}-{:02}", filters.year, filters.month);

    let mut surgeries: Vec<&CalendarEvent> = events
        .iter()
        .filter(|e| e.event_type == EventType::Surgery && e.surgery.is_some())
        .filter(|e| {
            e.day_key(tz)
                .map_or(false, |key| key.starts_with(&month_prefix))
        })
        .collect();
    surgeries.sort_by_key(|e| std::cmp::Reverse(e.start_ts(tz)));

    let (pending, paid): (Vec<f64>, Vec<f64>) = surgeries
        .iter()
        .filter_map(|e| e.surgery.as_ref())
        .partition_map(|s| match s.payment_status {
            PaymentStatus::Pending => Either::Left(s.amount),
            PaymentStatus::Paid => Either::Right(s.amount),
        });

    let entries = surgeries
        .into_iter()
        .filter(|e| {
            let status = e.surgery.as_ref().map(|s| s.payment_status);
            match filters.status {
                StatusFilter::All => true,
                StatusFilter::Pending => status == Some(PaymentStatus::Pending),
                StatusFilter::Paid => status == Some(PaymentStatus::Paid),
            }
        })
        .cloned()
        .collect();

    FinanceReport {
        pending_total: pending.iter().sum(),
        paid_total: paid.iter().sum(),
        entries,
    }
}
