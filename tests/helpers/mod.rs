use praxis_scheduler_api_structs::{create_event, create_recurrence};
use praxis_scheduler_domain::{EventType, RecurrenceRule, SurgeryInfo, WeekDay};

pub fn weekdays(days: &[u8]) -> Vec<WeekDay> {
    days.iter().map(|d| WeekDay::new(*d).unwrap()).collect()
}

pub fn office_event_body(date: &str, start_time: &str, end_time: &str) -> create_event::RequestBody {
    create_event::RequestBody {
        event_type: EventType::Office,
        title: Some("Checkup".into()),
        location: Some("Clinic".into()),
        notes: None,
        date: date.into(),
        start_time: start_time.into(),
        end_time: end_time.into(),
        surgery: None,
    }
}

pub fn surgery_event_body(
    date: &str,
    start_time: &str,
    end_time: &str,
    surgery: SurgeryInfo,
) -> create_event::RequestBody {
    create_event::RequestBody {
        event_type: EventType::Surgery,
        title: Some("Surgery".into()),
        location: Some("Hospital".into()),
        notes: None,
        date: date.into(),
        start_time: start_time.into(),
        end_time: end_time.into(),
        surgery: Some(surgery),
    }
}

pub fn office_series_body(
    days: &[u8],
    start_date: &str,
    until_date: &str,
    start_time: &str,
    end_time: &str,
) -> create_recurrence::RequestBody {
    create_recurrence::RequestBody {
        event_type: EventType::Office,
        title: Some("Office hours".into()),
        location: Some("Clinic".into()),
        notes: None,
        rule: RecurrenceRule::weekly(weekdays(days), start_date, until_date, start_time, end_time),
    }
}
