//! Inclusive range of calendar years used as the historic lookback.

use crate::error::SeasonalError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Creates a range, failing when `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, SeasonalError> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SeasonalError> {
        if self.start > self.end {
            return Err(SeasonalError::InvalidYearRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Replaces whichever bounds are given.
    pub fn with_bounds(self, start: Option<i32>, end: Option<i32>) -> Self {
        Self {
            start: start.unwrap_or(self.start),
            end: end.unwrap_or(self.end),
        }
    }

    /// First day of the range as an 8-digit `YYYYMMDD` key.
    pub fn start_key(&self) -> String {
        format!("{:04}0101", self.start)
    }

    /// Last day of the range as an 8-digit `YYYYMMDD` key.
    pub fn end_key(&self) -> String {
        format!("{:04}1231", self.end)
    }

    /// Number of calendar days from January 1st of `start` to December 31st of `end`.
    pub fn calendar_days(&self) -> Option<i64> {
        let first = NaiveDate::from_ymd_opt(self.start, 1, 1)?;
        let last = NaiveDate::from_ymd_opt(self.end, 12, 31)?;
        Some((last - first).num_days() + 1)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}", self.start, self.end)
    }
}
