//! Timestamps arrive from storage in two encodings: offset/UTC-suffixed
//! strings, which are absolute, and bare local stamps
//! (`YYYY-MM-DDTHH:MM:SS`), which mean the practitioner's wall clock.
//! This module is the only place that rule lives.

use crate::date::Day;
use chrono::prelude::*;
use chrono::LocalResult;
use chrono_tz::Tz;

/// Builds the bare-local encoding written to stored events.
pub fn local_stamp(datestr: &str, timestr: &str) -> String {
    format!("{}T{}:00", datestr, timestr)
}

/// Instant (unix millis) for a wall-clock moment in the given timezone.
/// Errs only on malformed date/time strings.
pub fn to_instant(datestr: &str, timestr: &str, tz: &Tz) -> anyhow::Result<i64> {
    let day = datestr.parse::<Day>()?;
    let (hours, minutes) = parse_clock(timestr)
        .ok_or_else(|| anyhow::Error::msg(format!("Invalid clock time: {}", timestr)))?;
    resolve_local(day, hours, minutes, 0, tz)
        .ok_or_else(|| anyhow::Error::msg(format!("Unresolvable local time: {} {}", datestr, timestr)))
}

/// Comparable unix millis for a stored timestamp string, or `None` when
/// the string is malformed so that callers can treat the row as
/// non-comparable instead of failing.
pub fn to_comparable_millis(iso_like: &str, tz: &Tz) -> Option<i64> {
    let s = iso_like.trim();
    if s.is_empty() {
        return None;
    }

    if has_utc_offset(s) {
        return DateTime::parse_from_rfc3339(s)
            .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M%:z"))
            .ok()
            .map(|dt| dt.timestamp_millis());
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()?;
    resolve_naive(naive, tz)
}

/// Canonical `YYYY-MM-DD` grouping/exception key, local time.
pub fn day_key(ts: i64, tz: &Tz) -> String {
    let dt = at(ts, tz);
    format!("{:04}-{:02}-{:02}", dt.year(), dt.month(), dt.day())
}

/// Zero-padded `HH:MM`, local time.
pub fn clock_label(ts: i64, tz: &Tz) -> String {
    let dt = at(ts, tz);
    format!("{:02}:{:02}", dt.hour(), dt.minute())
}

pub(crate) fn parse_clock(timestr: &str) -> Option<(u32, u32)> {
    let parts = timestr.split(':').collect::<Vec<_>>();
    if parts.len() != 2 {
        return None;
    }
    let hours = parts[0].parse::<u32>().ok()?;
    let minutes = parts[1].parse::<u32>().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some((hours, minutes))
}

fn at(ts: i64, tz: &Tz) -> DateTime<Tz> {
    Utc.timestamp_millis_opt(ts).unwrap().with_timezone(tz)
}

fn has_utc_offset(s: &str) -> bool {
    if s.ends_with('Z') {
        return true;
    }
    let bytes = s.as_bytes();
    if bytes.len() < 6 {
        return false;
    }
    let sign = bytes[bytes.len() - 6];
    (sign == b'+' || sign == b'-') && bytes[bytes.len() - 3] == b':'
}

fn resolve_local(day: Day, hours: u32, minutes: u32, seconds: u32, tz: &Tz) -> Option<i64> {
    let naive = NaiveDate::from_ymd_opt(day.year, day.month, day.day)?
        .and_hms_opt(hours, minutes, seconds)?;
    resolve_naive(naive, tz)
}

fn resolve_naive(naive: NaiveDateTime, tz: &Tz) -> Option<i64> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        // A clock turned back: the same wall time exists twice, take the first
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        // A clock turned forward: the wall time never existed, take the
        // first valid instant after the gap
        LocalResult::None => tz
            .from_local_datetime(&(naive + chrono::Duration::hours(1)))
            .earliest()
            .map(|dt| dt.timestamp_millis()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::{America::New_York, UTC};

    #[test]
    fn bare_local_stamp_means_wall_clock_in_timezone() {
        let utc_ts = to_comparable_millis("2025-01-13T08:30:00", &UTC).unwrap();
        let ny_ts = to_comparable_millis("2025-01-13T08:30:00", &New_York).unwrap();
        // New York wall clock is 5 hours behind UTC in January
        assert_eq!(ny_ts - utc_ts, 5 * 60 * 60 * 1000);
    }

    #[test]
    fn offset_suffixed_stamp_is_absolute() {
        let explicit = to_comparable_millis("2025-01-13T08:30:00Z", &New_York).unwrap();
        let reference = to_comparable_millis("2025-01-13T08:30:00", &UTC).unwrap();
        assert_eq!(explicit, reference);

        let offset = to_comparable_millis("2025-01-13T05:30:00-03:00", &New_York).unwrap();
        assert_eq!(offset, reference);

        // minute precision with offset
        let short = to_comparable_millis("2025-01-13T05:30-03:00", &New_York).unwrap();
        assert_eq!(short, reference);
    }

    #[test]
    fn malformed_input_is_not_comparable() {
        for bad in &["", "  ", "not a date", "2025-13-40T99:99:00", "2025-01-13"] {
            assert_eq!(to_comparable_millis(bad, &UTC), None, "{}", bad);
        }
    }

    #[test]
    fn to_instant_matches_bare_local_parse() {
        let direct = to_instant("2025-01-13", "08:30", &New_York).unwrap();
        let parsed = to_comparable_millis(&local_stamp("2025-01-13", "08:30"), &New_York).unwrap();
        assert_eq!(direct, parsed);
    }

    #[test]
    fn to_instant_rejects_malformed_parts() {
        assert!(to_instant("2025-02-30", "08:30", &UTC).is_err());
        assert!(to_instant("2025-01-13", "24:00", &UTC).is_err());
        assert!(to_instant("2025-01-13", "0830", &UTC).is_err());
    }

    #[test]
    fn day_key_and_clock_label_roundtrip_with_to_instant() {
        for tz in &[UTC, New_York] {
            let ts = to_instant("2025-01-06", "08:00", tz).unwrap();
            // seconds/millis jitter must not change the minute
            let jittered = ts + 42 * 1000 + 7;
            let key = day_key(jittered, tz);
            let label = clock_label(jittered, tz);
            assert_eq!(key, "2025-01-06");
            assert_eq!(label, "08:00");
            assert_eq!(to_instant(&key, &label, tz).unwrap(), ts);
        }
    }

    #[test]
    fn day_key_uses_local_calendar_day() {
        // 2025-01-14T02:00Z is still Jan 13 on the New York wall clock
        let ts = to_comparable_millis("2025-01-14T02:00:00Z", &New_York).unwrap();
        assert_eq!(day_key(ts, &New_York), "2025-01-13");
        assert_eq!(day_key(ts, &UTC), "2025-01-14");
    }

    #[test]
    fn dst_gap_resolves_forward() {
        // US spring-forward 2025: 02:30 on March 9 never existed in New York
        let ts = to_instant("2025-03-09", "02:30", &New_York).unwrap();
        assert_eq!(clock_label(ts, &New_York), "03:30");
    }
}
