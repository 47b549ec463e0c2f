use crate::dtos::CalendarEventDTO;
use praxis_scheduler_domain::{CalendarEvent, EventType, SurgeryInfo, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub event: CalendarEventDTO,
}

impl CalendarEventResponse {
    pub fn new(event: CalendarEvent) -> Self {
        Self {
            event: CalendarEventDTO::new(event),
        }
    }
}

pub mod create_event {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_type: EventType,
        pub title: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
        pub date: String,
        pub start_time: String,
        pub end_time: String,
        pub surgery: Option<SurgeryInfo>,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod get_events {
    use super::*;

    #[derive(Serialize, Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub start_ts: Option<i64>,
        pub end_ts: Option<i64>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<CalendarEventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<CalendarEvent>) -> Self {
            Self {
                events: events.into_iter().map(CalendarEventDTO::new).collect(),
            }
        }
    }
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_type: EventType,
        pub title: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
        pub date: String,
        pub start_time: String,
        pub end_time: String,
        pub surgery: Option<SurgeryInfo>,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod check_conflict {
    use super::*;

    /// Dry-run probe for the edit form; both sides may still be blank.
    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub start_at: Option<String>,
        pub end_at: Option<String>,
        pub exclude_event_id: Option<ID>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub conflict: Option<CalendarEventDTO>,
    }

    impl APIResponse {
        pub fn new(conflict: Option<CalendarEvent>) -> Self {
            Self {
                conflict: conflict.map(CalendarEventDTO::new),
            }
        }
    }
}
