//! Inclusive search window for publication dates

use chrono::{Duration, NaiveDate};
use thiserror::Error;

use super::PubDate;

/// Days in the default look-back window (five 365-day years)
pub const DEFAULT_WINDOW_DAYS: i64 = 5 * 365;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("Start date must be before end date ({start} > {end})")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// An inclusive `[start, end]` date window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window ending at `today` and reaching back `DEFAULT_WINDOW_DAYS`
    pub fn default_window(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(DEFAULT_WINDOW_DAYS),
            end: today,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether a publication date falls in the window.
    ///
    /// Partial dates are compared by their sort key, so `2019` is inside
    /// a window only if January 1, 2019 is.
    pub fn contains(&self, date: &PubDate) -> bool {
        let key = date.sort_key();
        self.start <= key && key <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_rejects_reversed_range() {
        let err = DateRange::new(ymd(2022, 1, 2), ymd(2022, 1, 1)).unwrap_err();
        assert!(err.to_string().starts_with("Start date must be before end date"));
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(ymd(2022, 1, 1), ymd(2022, 1, 1)).unwrap();
        assert!(range.contains(&PubDate::from_ymd(2022, 1, 1).unwrap()));
        assert!(range.contains(&PubDate::from_year(2022).unwrap()));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(ymd(2020, 3, 1), ymd(2020, 6, 30)).unwrap();
        assert!(range.contains(&PubDate::from_ymd(2020, 3, 1).unwrap()));
        assert!(range.contains(&PubDate::from_ymd(2020, 6, 30).unwrap()));
        assert!(!range.contains(&PubDate::from_ymd(2020, 7, 1).unwrap()));
    }

    #[test]
    fn test_year_only_uses_january_first() {
        let range = DateRange::new(ymd(2020, 3, 1), ymd(2021, 6, 30)).unwrap();
        assert!(!range.contains(&PubDate::from_year(2020).unwrap()));
        assert!(range.contains(&PubDate::from_year(2021).unwrap()));
    }

    #[test]
    fn test_default_window() {
        let today = ymd(2024, 6, 1);
        let range = DateRange::default_window(today);
        assert_eq!(range.end(), today);
        assert_eq!(range.start(), today - Duration::days(1825));
    }
}
