//! Day-of-year neighbourhood matching with wraparound at the year boundary.

use crate::types::target_date::TargetDate;
use chrono::{Datelike, NaiveDate};

/// Leap year every (month, day) pair is projected onto, so February 29th is always valid.
pub const REFERENCE_YEAR: i32 = 2024;

/// Distances above this are measured the other way around the year.
const HALF_YEAR_DAYS: u32 = 182;
const YEAR_DAYS: u32 = 365;

/// Ordinal of `(month, day)` in the reference leap year, or `None` if it is not a real date.
pub fn day_of_year(month: u32, day: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, day).map(|date| date.ordinal())
}

/// Circular distance in days between two calendar days.
pub fn day_distance(a: (u32, u32), b: (u32, u32)) -> Option<u32> {
    let diff = day_of_year(a.0, a.1)?.abs_diff(day_of_year(b.0, b.1)?);
    if diff > HALF_YEAR_DAYS {
        Some(YEAR_DAYS.saturating_sub(diff))
    } else {
        Some(diff)
    }
}

/// The calendar days within `tolerance_days` of a target day.
///
/// An invalid target (e.g. April 31st) matches nothing.
///
/// # Examples
///
/// ```
/// use seasonal_weather::season::window::DayWindow;
/// use seasonal_weather::TargetDate;
///
/// let window = DayWindow::new(TargetDate::new(12, 28), 7);
/// assert!(window.contains(1, 2));
/// assert!(!window.contains(1, 10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    target: (u32, u32),
    tolerance_days: u32,
}

impl DayWindow {
    pub fn new(target: TargetDate, tolerance_days: u32) -> Self {
        Self {
            target: (target.month(), target.day()),
            tolerance_days,
        }
    }

    /// Whether `(month, day)` falls inside the window. Invalid dates never match.
    pub fn contains(&self, month: u32, day: u32) -> bool {
        day_distance((month, day), self.target)
            .is_some_and(|distance| distance <= self.tolerance_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_days() -> Vec<(u32, u32)> {
        (1..=366)
            .filter_map(|ordinal| NaiveDate::from_yo_opt(REFERENCE_YEAR, ordinal))
            .map(|date| (date.month(), date.day()))
            .collect()
    }

    #[test]
    fn test_wraps_across_year_boundary() {
        let window = DayWindow::new(TargetDate::new(12, 28), 7);
        assert!(window.contains(1, 2));
        let window = DayWindow::new(TargetDate::new(1, 2), 7);
        assert!(window.contains(12, 28));
    }

    #[test]
    fn test_leap_day_is_a_valid_candidate() {
        let window = DayWindow::new(TargetDate::new(2, 28), 1);
        assert!(window.contains(2, 29));
        assert!(!window.contains(3, 1));
    }

    #[test]
    fn test_tolerance_edges() {
        let window = DayWindow::new(TargetDate::new(7, 15), 7);
        assert!(window.contains(7, 8));
        assert!(window.contains(7, 22));
        assert!(!window.contains(7, 7));
        assert!(!window.contains(7, 23));

        let exact = DayWindow::new(TargetDate::new(7, 15), 0);
        assert!(exact.contains(7, 15));
        assert!(!exact.contains(7, 16));
    }

    #[test]
    fn test_invalid_dates_fail_closed() {
        let window = DayWindow::new(TargetDate::new(4, 30), 30);
        assert!(!window.contains(4, 31));
        assert!(!window.contains(13, 1));
        assert!(!window.contains(0, 10));

        let invalid_target = DayWindow::new(TargetDate::new(2, 30), 400);
        assert!(!invalid_target.contains(2, 28));
    }

    #[test]
    fn test_wide_tolerance_matches_whole_year() {
        let window = DayWindow::new(TargetDate::new(6, 1), 183);
        assert!(all_days().into_iter().all(|(m, d)| window.contains(m, d)));
    }

    #[test]
    fn test_matching_is_symmetric() {
        let days = all_days();
        for tolerance in [0, 1, 7, 30, 181, 182, 183] {
            for &a in days.iter().step_by(5) {
                for &b in days.iter().step_by(7) {
                    let forward =
                        DayWindow::new(TargetDate::new(a.0, a.1), tolerance).contains(b.0, b.1);
                    let backward =
                        DayWindow::new(TargetDate::new(b.0, b.1), tolerance).contains(a.0, a.1);
                    assert_eq!(forward, backward, "{:?} vs {:?} at {}", a, b, tolerance);
                }
            }
        }
    }

    #[test]
    fn test_distance_values() {
        assert_eq!(day_distance((1, 1), (1, 1)), Some(0));
        assert_eq!(day_distance((2, 28), (2, 29)), Some(1));
        assert_eq!(day_distance((12, 31), (1, 1)), Some(0));
        assert_eq!(day_distance((12, 28), (1, 2)), Some(4));
        assert_eq!(day_distance((4, 31), (1, 1)), None);
    }
}
