//! Publication dates with day, month, or year precision
//!
//! PubMed frequently reports only a year (or a year and month) for an
//! article. Partial dates are anchored to the first day of the period
//! they name, so `2021` orders as `2021-01-01` and `2021-03` as
//! `2021-03-01`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// How much of a publication date is known
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatePrecision {
    Day,
    Month,
    Year,
}

/// A publication date, possibly partial
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PubDate {
    anchor: NaiveDate,
    precision: DatePrecision,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseDateError {
    #[error("Invalid publication date: {0}")]
    Invalid(String),
    #[error("Publication date out of range: {0}")]
    OutOfRange(String),
}

impl PubDate {
    /// A full calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            anchor: date,
            precision: DatePrecision::Day,
        }
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from_date)
    }

    pub fn from_year_month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|anchor| Self {
            anchor,
            precision: DatePrecision::Month,
        })
    }

    pub fn from_year(year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, 1, 1).map(|anchor| Self {
            anchor,
            precision: DatePrecision::Year,
        })
    }

    /// The date used for ranking and range checks.
    ///
    /// Partial dates sort at the start of their period; a year-only date
    /// therefore ties with January 1 of the same year.
    pub fn sort_key(&self) -> NaiveDate {
        self.anchor
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }

    pub fn year(&self) -> i32 {
        self.anchor.year()
    }
}

impl From<NaiveDate> for PubDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for PubDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            DatePrecision::Day => write!(f, "{}", self.anchor.format("%Y-%m-%d")),
            DatePrecision::Month => write!(f, "{}", self.anchor.format("%Y-%m")),
            DatePrecision::Year => write!(f, "{}", self.anchor.format("%Y")),
        }
    }
}

impl FromStr for PubDate {
    type Err = ParseDateError;

    /// Accepts `YYYY-MM-DD`, `YYYY-MM`, and `YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();

        let number = |part: &str| -> Result<u32, ParseDateError> {
            if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
                return Err(ParseDateError::Invalid(trimmed.to_string()));
            }
            part.parse::<u32>()
                .map_err(|_| ParseDateError::Invalid(trimmed.to_string()))
        };

        let out_of_range = || ParseDateError::OutOfRange(trimmed.to_string());

        match parts.as_slice() {
            [year] if year.len() == 4 => {
                Self::from_year(number(year)? as i32).ok_or_else(out_of_range)
            }
            [year, month] if year.len() == 4 => {
                Self::from_year_month(number(year)? as i32, number(month)?)
                    .ok_or_else(out_of_range)
            }
            [year, month, day] if year.len() == 4 => {
                Self::from_ymd(number(year)? as i32, number(month)?, number(day)?)
                    .ok_or_else(out_of_range)
            }
            _ => Err(ParseDateError::Invalid(trimmed.to_string())),
        }
    }
}

impl Serialize for PubDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PubDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
