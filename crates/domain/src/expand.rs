use crate::conflict::{find_conflict, CandidateSpan};
use crate::event::{CalendarEvent, EventDraft};
use crate::recurrence::RecurrenceRule;
use crate::shared::entity::{EventId, ID};
use crate::time;
use chrono_tz::Tz;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpandError {
    #[error("Occurrence on {at_date} overlaps an existing booking")]
    Conflict {
        event: Box<CalendarEvent>,
        at_date: String,
    },
    #[error("Recurrence rule would produce more than {cap} occurrences")]
    TooMany { cap: usize },
    #[error("Recurrence rule produced no occurrences")]
    Empty,
}

/// One full expansion pass of a weekly rule into concrete occurrences.
///
/// All inputs are plain in-memory values: the caller loads events and the
/// exception ledger before building this, and persists the result after.
/// The pass is all-or-nothing; a conflict or cap overflow discards every
/// occurrence accepted so far.
#[derive(Debug)]
pub struct WeeklyExpansion<'a> {
    pub draft: &'a EventDraft,
    pub rule: &'a RecurrenceRule,
    pub series_id: ID,
    pub existing: &'a [CalendarEvent],
    /// Day keys permanently excluded from this series.
    pub exceptions: &'a HashSet<String>,
    pub max_occurrences: usize,
    pub now: i64,
    pub timezone: Tz,
}

impl WeeklyExpansion<'_> {
    pub fn expand(
        &self,
        new_id: &mut dyn FnMut() -> EventId,
    ) -> Result<Vec<CalendarEvent>, ExpandError> {
        if self.rule.weekdays.is_empty() {
            return Ok(Vec::new());
        }
        let (mut day, last) = match self.rule.period() {
            Some(period) => period,
            None => return Err(ExpandError::Empty),
        };

        let tz = &self.timezone;
        let mut generated: Vec<CalendarEvent> = Vec::new();

        while day <= last {
            if self.rule.selects(day.weekday()) {
                let date = day.to_string();
                if !self.exceptions.contains(&date) {
                    let start_at = time::local_stamp(&date, &self.rule.start_time);
                    let end_at = time::local_stamp(&date, &self.rule.end_time);
                    let candidate = CandidateSpan::from_stored(&start_at, &end_at, tz);

                    // The series must not collide with itself either, so
                    // occurrences accepted earlier in this pass count too.
                    let hit = find_conflict(&candidate, self.existing, None, tz)
                        .or_else(|| find_conflict(&candidate, &generated, None, tz))
                        .cloned();
                    if let Some(event) = hit {
                        return Err(ExpandError::Conflict {
                            event: Box::new(event),
                            at_date: date,
                        });
                    }

                    generated.push(self.draft.clone().into_occurrence(
                        new_id(),
                        start_at,
                        end_at,
                        self.series_id,
                        self.rule.clone(),
                        self.now,
                    ));
                    if generated.len() > self.max_occurrences {
                        return Err(ExpandError::TooMany {
                            cap: self.max_occurrences,
                        });
                    }
                }
            }
            day.inc();
        }

        if generated.is_empty() {
            return Err(ExpandError::Empty);
        }
        Ok(generated)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::EventType;
    use crate::recurrence::WeekDay;
    use chrono_tz::UTC;

    fn draft() -> EventDraft {
        EventDraft {
            event_type: EventType::Office,
            title: Some("Office hours".into()),
            location: Some("Clinic".into()),
            notes: None,
            surgery: None,
        }
    }

    fn weekdays(days: &[u8]) -> Vec<WeekDay> {
        days.iter().map(|d| WeekDay::new(*d).unwrap()).collect()
    }

    fn mon_wed_rule() -> RecurrenceRule {
        RecurrenceRule::weekly(
            weekdays(&[1, 3]),
            "2025-01-06",
            "2025-01-20",
            "08:00",
            "09:00",
        )
    }

    fn expansion<'a>(
        draft: &'a EventDraft,
        rule: &'a RecurrenceRule,
        series_id: ID,
        existing: &'a [CalendarEvent],
        exceptions: &'a HashSet<String>,
    ) -> WeeklyExpansion<'a> {
        WeeklyExpansion {
            draft,
            rule,
            series_id,
            existing,
            exceptions,
            max_occurrences: 365,
            now: 1700000000000,
            timezone: UTC,
        }
    }

    fn pending_ids() -> impl FnMut() -> EventId {
        || EventId::pending()
    }

    #[test]
    fn expands_mondays_and_wednesdays_inclusive_of_bounds() {
        let draft = draft();
        let rule = mon_wed_rule();
        let series_id = ID::new();
        let none = HashSet::new();
        let occurrences = expansion(&draft, &rule, series_id, &[], &none)
            .expand(&mut pending_ids())
            .unwrap();

        let starts: Vec<&str> = occurrences.iter().map(|o| o.start_at.as_str()).collect();
        assert_eq!(
            starts,
            vec![
                "2025-01-06T08:00:00",
                "2025-01-08T08:00:00",
                "2025-01-13T08:00:00",
                "2025-01-15T08:00:00",
                "2025-01-20T08:00:00",
            ]
        );
        for occurrence in &occurrences {
            assert!(occurrence.end_at.ends_with("T09:00:00"));
            assert_eq!(occurrence.series_id, Some(series_id));
            assert_eq!(occurrence.recurrence.as_ref(), Some(&rule));
            assert!(occurrence.id.is_pending());
            assert!(!occurrence.is_override);
        }
    }

    #[test]
    fn conflict_aborts_the_whole_pass() {
        let draft = draft();
        let rule = mon_wed_rule();
        let busy = EventDraft {
            event_type: EventType::Personal,
            title: Some("Dentist".into()),
            location: None,
            notes: None,
            surgery: None,
        }
        .into_event(
            EventId::Persisted(ID::new()),
            "2025-01-13T08:30:00".into(),
            "2025-01-13T08:45:00".into(),
            0,
        );
        let existing = vec![busy.clone()];
        let none = HashSet::new();

        let err = expansion(&draft, &rule, ID::new(), &existing, &none)
            .expand(&mut pending_ids())
            .unwrap_err();
        match err {
            ExpandError::Conflict { event, at_date } => {
                assert_eq!(at_date, "2025-01-13");
                assert_eq!(event.id, busy.id);
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn series_cannot_collide_with_itself() {
        let draft = draft();
        // duplicate weekday entries put two occurrences on the same slot
        let rule = RecurrenceRule::weekly(
            weekdays(&[1, 1]),
            "2025-01-06",
            "2025-01-06",
            "08:00",
            "09:00",
        );
        let none = HashSet::new();

        let err = expansion(&draft, &rule, ID::new(), &[], &none)
            .expand(&mut pending_ids())
            .unwrap_err();
        assert!(matches!(err, ExpandError::Conflict { .. }));
    }

    #[test]
    fn empty_weekday_set_expands_to_nothing() {
        let draft = draft();
        let rule = RecurrenceRule::weekly(vec![], "2025-01-06", "2025-01-20", "08:00", "09:00");
        let none = HashSet::new();

        let occurrences = expansion(&draft, &rule, ID::new(), &[], &none)
            .expand(&mut pending_ids())
            .unwrap();
        assert!(occurrences.is_empty());
    }

    #[test]
    fn barren_range_with_selected_weekdays_is_an_error() {
        let draft = draft();
        // until before start
        let rule = RecurrenceRule::weekly(
            weekdays(&[1]),
            "2025-01-20",
            "2025-01-06",
            "08:00",
            "09:00",
        );
        let none = HashSet::new();

        let err = expansion(&draft, &rule, ID::new(), &[], &none)
            .expand(&mut pending_ids())
            .unwrap_err();
        assert_eq!(err, ExpandError::Empty);
    }

    #[test]
    fn cap_overflow_reports_the_cap() {
        let draft = draft();
        let rule = mon_wed_rule();
        let none = HashSet::new();
        let mut pass = expansion(&draft, &rule, ID::new(), &[], &none);
        pass.max_occurrences = 3;

        let err = pass.expand(&mut pending_ids()).unwrap_err();
        assert_eq!(err, ExpandError::TooMany { cap: 3 });
    }

    #[test]
    fn exception_days_are_never_rematerialized() {
        let draft = draft();
        let rule = mon_wed_rule();
        let skipped: HashSet<String> = vec!["2025-01-13".to_string()].into_iter().collect();

        let occurrences = expansion(&draft, &rule, ID::new(), &[], &skipped)
            .expand(&mut pending_ids())
            .unwrap();
        assert_eq!(occurrences.len(), 4);
        assert!(occurrences
            .iter()
            .all(|o| !o.start_at.starts_with("2025-01-13")));
    }

    #[test]
    fn exception_day_also_suppresses_its_conflict() {
        let draft = draft();
        let rule = mon_wed_rule();
        // An event sits exactly on the excepted day; without the
        // exception this expansion would abort.
        let busy = EventDraft {
            event_type: EventType::Personal,
            title: None,
            location: None,
            notes: None,
            surgery: None,
        }
        .into_event(
            EventId::Persisted(ID::new()),
            "2025-01-13T08:00:00".into(),
            "2025-01-13T09:00:00".into(),
            0,
        );
        let existing = vec![busy];
        let skipped: HashSet<String> = vec!["2025-01-13".to_string()].into_iter().collect();

        let occurrences = expansion(&draft, &rule, ID::new(), &existing, &skipped)
            .expand(&mut pending_ids())
            .unwrap();
        assert_eq!(occurrences.len(), 4);
    }

    #[test]
    fn expansion_is_deterministic_apart_from_ids() {
        let draft = draft();
        let rule = mon_wed_rule();
        let series_id = ID::new();
        let none = HashSet::new();

        let strip_ids = |events: Vec<CalendarEvent>| {
            events
                .into_iter()
                .map(|e| (e.start_at, e.end_at, e.series_id))
                .collect::<Vec<_>>()
        };

        let first = expansion(&draft, &rule, series_id, &[], &none)
            .expand(&mut pending_ids())
            .unwrap();
        let second = expansion(&draft, &rule, series_id, &[], &none)
            .expand(&mut pending_ids())
            .unwrap();
        assert_eq!(strip_ids(first), strip_ids(second));
    }

    #[test]
    fn back_to_back_weekday_slots_coexist() {
        let draft = draft();
        let rule = mon_wed_rule();
        let none = HashSet::new();
        // Existing booking ends exactly when the series starts
        let busy = EventDraft {
            event_type: EventType::Personal,
            title: None,
            location: None,
            notes: None,
            surgery: None,
        }
        .into_event(
            EventId::Persisted(ID::new()),
            "2025-01-06T07:00:00".into(),
            "2025-01-06T08:00:00".into(),
            0,
        );
        let existing = vec![busy];

        let occurrences = expansion(&draft, &rule, ID::new(), &existing, &none)
            .expand(&mut pending_ids())
            .unwrap();
        assert_eq!(occurrences.len(), 5);
    }
}
