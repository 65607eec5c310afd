use std::str::FromStr;

use chrono::Datelike;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Latest year a birthdate may carry (inclusive).
pub const MAX_YEAR: u16 = 9999;

/// A calendar date that is guaranteed to exist.
///
/// Construction validates the day against the Gregorian month lengths, so an
/// interpreter that obtains a `Date` has already proven the token encodes a
/// real birthday. Ordering is calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct Date {
    year: u16,
    month: u8,
    day: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Not a `YYYY-MM-DD` string.
    #[error("invalid date string: {0:?}")]
    Format(String),

    #[error("year {0} is out of range (1-9999)")]
    Year(u16),

    #[error("month {0} is out of range (1-12)")]
    Month(u8),

    #[error("day {day} does not exist in {year:04}-{month:02}")]
    Day { year: u16, month: u8, day: u8 },
}

impl Date {
    /// Creates a date, rejecting anything the calendar does not contain.
    ///
    /// # Errors
    /// Returns the first failing component as a [`DateError`].
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if year == 0 || year > MAX_YEAR {
            return Err(DateError::Year(year));
        }
        if month == 0 || month > 12 {
            return Err(DateError::Month(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DateError::Day { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// The current date according to the system clock.
    pub fn today() -> Self {
        let now = chrono::Local::now().date_naive();
        // chrono only hands out real calendar dates
        Self {
            year: u16::try_from(now.year()).unwrap_or(MAX_YEAR),
            month: now.month() as u8,
            day: now.day() as u8,
        }
    }

    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut parts = trimmed.splitn(3, '-');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(DateError::Format(trimmed.to_owned()));
        };
        let year = year
            .parse()
            .map_err(|_| DateError::Format(trimmed.to_owned()))?;
        let month = month
            .parse()
            .map_err(|_| DateError::Format(trimmed.to_owned()))?;
        let day = day
            .parse()
            .map_err(|_| DateError::Format(trimmed.to_owned()))?;
        Self::new(year, month, day)
    }
}

impl Serialize for Date {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub(crate) const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub(crate) const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}
