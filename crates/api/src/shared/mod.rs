pub mod usecase;

use chrono_tz::Tz;
use praxis_scheduler_domain::{clock_label, day_key, CalendarEvent};

/// Actionable description of a conflicting event for user-facing
/// messages: which booking, on which day, at what time.
pub fn conflict_detail(event: &CalendarEvent, tz: &Tz) -> String {
    let title = event.title.as_deref().unwrap_or("Untitled");
    match (event.start_ts(tz), event.end_ts(tz)) {
        (Some(start), Some(end)) => format!(
            "\"{}\" on {} from {} to {}",
            title,
            day_key(start, tz),
            clock_label(start, tz),
            clock_label(end, tz)
        ),
        _ => format!("\"{}\" ({} - {})", title, event.start_at, event.end_at),
    }
}
