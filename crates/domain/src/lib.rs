mod conflict;
mod date;
mod event;
mod exception;
mod expand;
mod recurrence;
mod report;
mod shared;
mod time;
mod timespan;

pub use conflict::{find_conflict, CandidateSpan};
pub use date::Day;
pub use event::{CalendarEvent, EventDraft, EventType, PaymentStatus, SurgeryInfo};
pub use exception::{day_key_set, RecurrenceException};
pub use expand::{ExpandError, WeeklyExpansion};
pub use recurrence::{RecurrenceKind, RecurrenceRule, RuleError, WeekDay};
pub use report::{build_finance_report, FinanceFilters, FinanceReport, StatusFilter};
pub use shared::entity::{Entity, EventId, ID};
pub use time::{clock_label, day_key, local_stamp, to_comparable_millis, to_instant};
pub use timespan::TimeSpan;
