use crate::dtos::CalendarEventDTO;
use crate::CalendarEventResponse;
use praxis_scheduler_domain::{CalendarEvent, EventType, RecurrenceRule, ID};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub series_id: ID,
    pub events: Vec<CalendarEventDTO>,
}

impl SeriesResponse {
    pub fn new(series_id: ID, events: Vec<CalendarEvent>) -> Self {
        Self {
            series_id,
            events: events.into_iter().map(CalendarEventDTO::new).collect(),
        }
    }
}

pub mod create_recurrence {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_type: EventType,
        pub title: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
        pub rule: RecurrenceRule,
    }

    pub type APIResponse = SeriesResponse;
}

pub mod update_recurrence {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub series_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub event_type: EventType,
        pub title: Option<String>,
        pub location: Option<String>,
        pub notes: Option<String>,
        pub rule: RecurrenceRule,
    }

    pub type APIResponse = SeriesResponse;
}

pub mod delete_recurrence {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub series_id: ID,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted_count: usize,
    }
}

pub mod delete_occurrence {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub series_id: ID,
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}
