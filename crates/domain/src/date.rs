use chrono::prelude::*;
use std::str::FromStr;
use thiserror::Error;

/// A plain calendar date. Series expansion walks over these instead of
/// instants so that month/year boundaries and daylight-saving days cannot
/// skew the iteration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Day {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidDateError {
    #[error("Invalid calendar date: {0}")]
    Malformed(String),
}

impl FromStr for Day {
    type Err = InvalidDateError;

    fn from_str(datestr: &str) -> Result<Self, Self::Err> {
        let e = InvalidDateError::Malformed(datestr.to_string());
        let parts = datestr.split('-').collect::<Vec<_>>();
        if parts.len() != 3 {
            return Err(e);
        }
        let year = parts[0].parse::<i32>().map_err(|_| e.clone())?;
        let month = parts[1].parse::<u32>().map_err(|_| e.clone())?;
        let day = parts[2].parse::<u32>().map_err(|_| e.clone())?;

        if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
            return Err(e);
        }
        if day < 1 || day > month_length(year, month) {
            return Err(e);
        }

        Ok(Self { year, month, day })
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Zero-padded: this string doubles as the exception ledger key
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Day {
    pub fn inc(&mut self) {
        if self.day == month_length(self.year, self.month) {
            self.day = 1;
            if self.month == 12 {
                self.month = 1;
                self.year += 1;
            } else {
                self.month += 1;
            }
        } else {
            self.day += 1;
        }
    }

    /// Weekday number, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .map(|d| d.weekday().num_days_from_sunday() as u8)
            .unwrap_or_else(|| panic!("Invalid day: {}", self))
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn month_length(year: i32, month: u32) -> u32 {
    match month {
        1 => 31,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 => 31,
        4 => 30,
        5 => 31,
        6 => 30,
        7 => 31,
        8 => 31,
        9 => 30,
        10 => 31,
        11 => 30,
        12 => 31,
        _ => panic!("Invalid month"),
    }
}
