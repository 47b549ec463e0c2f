use praxis_scheduler_domain::{CalendarEvent, EventType, RecurrenceRule, SurgeryInfo, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDTO {
    pub id: ID,
    pub event_type: EventType,
    pub title: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub start_at: String,
    pub end_at: String,
    pub surgery: Option<SurgeryInfo>,
    pub series_id: Option<ID>,
    pub recurrence: Option<RecurrenceRule>,
    pub is_override: bool,
    pub updated: i64,
    pub created: i64,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            id: event.id.value(),
            event_type: event.event_type,
            title: event.title,
            location: event.location,
            notes: event.notes,
            start_at: event.start_at,
            end_at: event.end_at,
            surgery: event.surgery,
            series_id: event.series_id,
            recurrence: event.recurrence,
            is_override: event.is_override,
            updated: event.updated,
            created: event.created,
        }
    }
}
