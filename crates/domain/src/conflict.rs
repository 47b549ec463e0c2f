use crate::event::CalendarEvent;
use crate::shared::entity::EventId;
use crate::time;
use chrono_tz::Tz;

/// Interval proposed by an edit form. Either side may still be missing or
/// unparseable while the user is typing, which simply means no conflict
/// can be reported yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CandidateSpan {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl CandidateSpan {
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn from_stored(start_at: &str, end_at: &str, tz: &Tz) -> Self {
        Self {
            start: time::to_comparable_millis(start_at, tz),
            end: time::to_comparable_millis(end_at, tz),
        }
    }
}

/// First event in input order that overlaps the candidate, or `None`.
///
/// Overlap is half-open: an event ending exactly when the candidate
/// starts is not a conflict, so back-to-back bookings stay legal. Events
/// whose stored timestamps do not parse are skipped rather than reported.
/// `exclude` names the event currently being edited; pending events are
/// regular conflict sources and are only ever skipped through it.
pub fn find_conflict<'a>(
    candidate: &CandidateSpan,
    events: &'a [CalendarEvent],
    exclude: Option<EventId>,
    tz: &Tz,
) -> Option<&'a CalendarEvent> {
    let (c_start, c_end) = match (candidate.start, candidate.end) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => return None,
    };

    events.iter().find(|event| {
        if exclude == Some(event.id) {
            return false;
        }
        let (start, end) = match (event.start_ts(tz), event.end_ts(tz)) {
            (Some(start), Some(end)) => (start, end),
            _ => return false,
        };
        c_start < end && c_end > start
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{EventDraft, EventType};
    use chrono_tz::UTC;
    use proptest::prelude::*;

    fn event(start_at: &str, end_at: &str) -> CalendarEvent {
        EventDraft {
            event_type: EventType::Office,
            title: Some("Existing".into()),
            location: None,
            notes: None,
            surgery: None,
        }
        .into_event(EventId::pending(), start_at.into(), end_at.into(), 0)
    }

    fn candidate(start_at: &str, end_at: &str) -> CandidateSpan {
        CandidateSpan::from_stored(start_at, end_at, &UTC)
    }

    #[test]
    fn reports_first_overlapping_event_in_input_order() {
        let events = vec![
            event("2025-01-13T07:00:00", "2025-01-13T08:00:00"),
            event("2025-01-13T08:30:00", "2025-01-13T08:45:00"),
            event("2025-01-13T08:40:00", "2025-01-13T09:30:00"),
        ];

        let hit = find_conflict(
            &candidate("2025-01-13T08:00:00", "2025-01-13T09:00:00"),
            &events,
            None,
            &UTC,
        )
        .unwrap();
        assert_eq!(hit.id, events[1].id);
    }

    #[test]
    fn back_to_back_events_do_not_conflict() {
        let events = vec![event("2025-01-13T10:00:00", "2025-01-13T11:00:00")];

        assert!(find_conflict(
            &candidate("2025-01-13T11:00:00", "2025-01-13T12:00:00"),
            &events,
            None,
            &UTC,
        )
        .is_none());
        assert!(find_conflict(
            &candidate("2025-01-13T09:00:00", "2025-01-13T10:00:00"),
            &events,
            None,
            &UTC,
        )
        .is_none());
    }

    #[test]
    fn incomplete_or_inverted_candidate_reports_nothing() {
        let events = vec![event("2025-01-13T08:00:00", "2025-01-13T09:00:00")];

        for span in &[
            CandidateSpan::default(),
            CandidateSpan {
                start: Some(0),
                end: None,
            },
            candidate("2025-01-13T09:00:00", "2025-01-13T08:00:00"),
            candidate("2025-01-13T08:00:00", "2025-01-13T08:00:00"),
            candidate("garbage", "2025-01-13T09:00:00"),
        ] {
            assert!(find_conflict(span, &events, None, &UTC).is_none());
        }
    }

    #[test]
    fn excludes_the_event_being_edited() {
        let existing = event("2025-01-13T08:00:00", "2025-01-13T09:00:00");
        let events = vec![existing.clone()];

        let span = candidate("2025-01-13T08:00:00", "2025-01-13T09:00:00");
        assert!(find_conflict(&span, &events, Some(existing.id), &UTC).is_none());
        assert!(find_conflict(&span, &events, None, &UTC).is_some());
    }

    #[test]
    fn skips_events_with_malformed_timestamps() {
        let mut broken = event("2025-01-13T08:00:00", "2025-01-13T09:00:00");
        broken.end_at = "mid-migration".into();
        let events = vec![broken];

        assert!(find_conflict(
            &candidate("2025-01-13T08:00:00", "2025-01-13T09:00:00"),
            &events,
            None,
            &UTC,
        )
        .is_none());
    }

    #[test]
    fn pending_events_are_conflict_sources() {
        let pending = event("2025-01-13T08:00:00", "2025-01-13T09:00:00");
        assert!(pending.id.is_pending());

        let events = [pending];
        let hit = find_conflict(
            &candidate("2025-01-13T08:30:00", "2025-01-13T09:30:00"),
            &events,
            None,
            &UTC,
        );
        assert!(hit.is_some());
    }

    #[test]
    fn mixed_encodings_compare_on_the_same_axis() {
        // Same instant, one row stored with explicit UTC suffix
        let events = vec![event("2025-01-13T08:30:00Z", "2025-01-13T08:45:00Z")];

        assert!(find_conflict(
            &candidate("2025-01-13T08:00:00", "2025-01-13T09:00:00"),
            &events,
            None,
            &UTC,
        )
        .is_some());
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            a_start in -100_000i64..100_000,
            a_len in 1i64..50_000,
            b_start in -100_000i64..100_000,
            b_len in 1i64..50_000,
        ) {
            let a = (a_start, a_start + a_len);
            let b = (b_start, b_start + b_len);

            // encode raw millis as epoch-relative UTC stamps
            let stamp = |ts: i64| {
                use chrono::TimeZone;
                chrono::Utc
                    .timestamp_millis_opt(ts)
                    .unwrap()
                    .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                    .to_string()
            };
            let a_event = event(&stamp(a.0), &stamp(a.1));
            let b_event = event(&stamp(b.0), &stamp(b.1));

            let a_vs_b = find_conflict(&CandidateSpan::new(a.0, a.1), &[b_event], None, &UTC).is_some();
            let b_vs_a = find_conflict(&CandidateSpan::new(b.0, b.1), &[a_event], None, &UTC).is_some();
            prop_assert_eq!(a_vs_b, b_vs_a);
        }
    }
}
