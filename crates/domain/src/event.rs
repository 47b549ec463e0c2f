use crate::recurrence::RecurrenceRule;
use crate::shared::entity::{Entity, EventId, ID};
use crate::time;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Office,
    Surgery,
    Personal,
}

impl EventType {
    /// Only office visits can be turned into a weekly series.
    pub fn may_recur(self) -> bool {
        matches!(self, EventType::Office)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn toggled(self) -> Self {
        match self {
            PaymentStatus::Pending => PaymentStatus::Paid,
            PaymentStatus::Paid => PaymentStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeryInfo {
    pub amount: f64,
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: EventId,
    pub event_type: EventType,
    pub title: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    /// Stored timestamp strings, kept verbatim as the store delivered
    /// them. Either offset/UTC-suffixed or a bare local stamp.
    pub start_at: String,
    pub end_at: String,
    pub surgery: Option<SurgeryInfo>,
    pub series_id: Option<ID>,
    pub recurrence: Option<RecurrenceRule>,
    /// Detached from its series by a single-occurrence edit. Override
    /// rows survive series regeneration and series deletion.
    pub is_override: bool,
    pub created: i64,
    pub updated: i64,
}

impl Entity<EventId> for CalendarEvent {
    fn id(&self) -> EventId {
        self.id
    }
}

impl CalendarEvent {
    pub fn start_ts(&self, tz: &Tz) -> Option<i64> {
        time::to_comparable_millis(&self.start_at, tz)
    }

    pub fn end_ts(&self, tz: &Tz) -> Option<i64> {
        time::to_comparable_millis(&self.end_at, tz)
    }

    /// Exception ledger key of the day this event starts on.
    pub fn day_key(&self, tz: &Tz) -> Option<String> {
        self.start_ts(tz).map(|ts| time::day_key(ts, tz))
    }

    /// True for rows that a series rebuild is allowed to delete.
    pub fn is_regenerable(&self, series_id: ID) -> bool {
        self.series_id == Some(series_id) && !self.is_override
    }
}

/// Everything needed to create an event except its identity and times.
/// A standalone creation uses it once; a weekly expansion clones it per
/// occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDraft {
    pub event_type: EventType,
    pub title: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub surgery: Option<SurgeryInfo>,
}

impl EventDraft {
    pub fn into_event(self, id: EventId, start_at: String, end_at: String, now: i64) -> CalendarEvent {
        CalendarEvent {
            id,
            event_type: self.event_type,
            title: self.title,
            location: self.location,
            notes: self.notes,
            start_at,
            end_at,
            surgery: self.surgery,
            series_id: None,
            recurrence: None,
            is_override: false,
            created: now,
            updated: now,
        }
    }

    pub fn into_occurrence(
        self,
        id: EventId,
        start_at: String,
        end_at: String,
        series_id: ID,
        rule: RecurrenceRule,
        now: i64,
    ) -> CalendarEvent {
        let mut event = self.into_event(id, start_at, end_at, now);
        event.series_id = Some(series_id);
        event.recurrence = Some(rule);
        event
    }
}
