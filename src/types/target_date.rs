//! The calendar day being predicted, parsed from caller input.
//!
//! Three shapes are accepted: `YYYY/MM/DD`, `MM/DD` and `YYYYMMDD`. The year is not validated
//! and, when it is numeric, kept for display only; matching works on month and day alone. Whether the month/day pair
//! is a real date is not checked here, see [`crate::season::window::DayWindow`].

use crate::error::SeasonalError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetDate {
    month: u32,
    day: u32,
    year: Option<i32>,
}

impl TargetDate {
    pub fn new(month: u32, day: u32) -> Self {
        Self {
            month,
            day,
            year: None,
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Parses a target date string.
    ///
    /// # Examples
    ///
    /// ```
    /// use seasonal_weather::TargetDate;
    ///
    /// let solstice = TargetDate::parse("2025/06/21").unwrap();
    /// assert_eq!((solstice.month(), solstice.day()), (6, 21));
    ///
    /// let july = TargetDate::parse("07/15").unwrap();
    /// assert_eq!((july.month(), july.day()), (7, 15));
    ///
    /// assert!(TargetDate::parse("June 21").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SeasonalError::InvalidDateFormat`] for any other shape or a non-numeric component.
    pub fn parse(input: &str) -> Result<Self, SeasonalError> {
        let trimmed = input.trim();
        let invalid = || SeasonalError::InvalidDateFormat(input.to_string());

        if trimmed.contains('/') {
            let parts: Vec<&str> = trimmed.split('/').collect();
            return match parts.as_slice() {
                [year, month, day] => Ok(Self {
                    month: parse_number(month).ok_or_else(invalid)?,
                    day: parse_number(day).ok_or_else(invalid)?,
                    year: parse_number(year),
                }),
                [month, day] => Ok(Self {
                    month: parse_number(month).ok_or_else(invalid)?,
                    day: parse_number(day).ok_or_else(invalid)?,
                    year: None,
                }),
                _ => Err(invalid()),
            };
        }

        if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self {
                month: parse_number(&trimmed[4..6]).ok_or_else(invalid)?,
                day: parse_number(&trimmed[6..8]).ok_or_else(invalid)?,
                year: Some(parse_number(&trimmed[0..4]).ok_or_else(invalid)?),
            });
        }

        Err(invalid())
    }
}

fn parse_number<T: FromStr>(part: &str) -> Option<T> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for TargetDate {
    type Err = SeasonalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{:04}/{:02}/{:02}", year, self.month, self.day),
            None => write!(f, "{:02}/{:02}", self.month, self.day),
        }
    }
}
