use crate::date::Day;
use crate::time;
use serde::{de::Visitor, Deserialize, Serialize};
use thiserror::Error;

/// Weekday selected by a weekly rule, 0 = Sunday .. 6 = Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekDay(u8);

#[derive(Error, Debug, PartialEq)]
pub enum InvalidWeekDayError {
    #[error("Invalid weekday number: {0}")]
    OutOfRange(u64),
}

impl WeekDay {
    pub fn new(weekday: u8) -> Result<Self, InvalidWeekDayError> {
        if weekday <= 6 {
            Ok(Self(weekday))
        } else {
            Err(InvalidWeekDayError::OutOfRange(u64::from(weekday)))
        }
    }

    pub fn num(self) -> u8 {
        self.0
    }
}

impl Serialize for WeekDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for WeekDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WeekDayVisitor;

        impl<'de> Visitor<'de> for WeekDayVisitor {
            type Value = WeekDay;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("A weekday number between 0 and 6")
            }

            fn visit_u64<E>(self, value: u64) -> Result<WeekDay, E>
            where
                E: serde::de::Error,
            {
                if value > 6 {
                    return Err(E::custom(format!("Invalid weekday number: {}", value)));
                }
                WeekDay::new(value as u8)
                    .map_err(|_| E::custom(format!("Invalid weekday number: {}", value)))
            }

            fn visit_i64<E>(self, value: i64) -> Result<WeekDay, E>
            where
                E: serde::de::Error,
            {
                if value < 0 {
                    return Err(E::custom(format!("Invalid weekday number: {}", value)));
                }
                self.visit_u64(value as u64)
            }
        }

        deserializer.deserialize_u64(WeekDayVisitor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Weekly,
}

/// The recurrence rule as exchanged with the UI layer and stamped onto
/// every generated occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub kind: RecurrenceKind,
    pub weekdays: Vec<WeekDay>,
    pub start_date: String,
    pub until_date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum RuleError {
    #[error("Malformed date in recurrence rule: {0}")]
    MalformedDate(String),
    #[error("Malformed time in recurrence rule: {0}")]
    MalformedTime(String),
    #[error("Recurrence start time must be before its end time")]
    InvertedTimes,
}

impl RecurrenceRule {
    pub fn weekly(
        weekdays: Vec<WeekDay>,
        start_date: impl Into<String>,
        until_date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            kind: RecurrenceKind::Weekly,
            weekdays,
            start_date: start_date.into(),
            until_date: until_date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        for date in &[&self.start_date, &self.until_date] {
            if date.parse::<Day>().is_err() {
                return Err(RuleError::MalformedDate(date.to_string()));
            }
        }
        let start = time::parse_clock(&self.start_time)
            .ok_or_else(|| RuleError::MalformedTime(self.start_time.clone()))?;
        let end = time::parse_clock(&self.end_time)
            .ok_or_else(|| RuleError::MalformedTime(self.end_time.clone()))?;
        if start >= end {
            return Err(RuleError::InvertedTimes);
        }
        Ok(())
    }

    /// Walk boundaries, or `None` when a date does not parse.
    pub fn period(&self) -> Option<(Day, Day)> {
        let start = self.start_date.parse::<Day>().ok()?;
        let until = self.until_date.parse::<Day>().ok()?;
        Some((start, until))
    }

    pub fn selects(&self, weekday: u8) -> bool {
        self.weekdays.iter().any(|w| w.num() == weekday)
    }
}
