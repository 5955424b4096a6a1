//! Reporting period and holiday input models.
//!
//! This module contains the [`Period`] type identifying the month a
//! timesheet covers and the [`HolidayInput`] type for the loosely typed
//! holiday lists callers send.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month that a timesheet covers.
///
/// # Example
///
/// ```
/// use kpi_engine::models::Period;
///
/// let period = Period::new(2024, 2);
/// assert_eq!(period.days_in_month(), 29);
/// assert!(period.date(29).is_some());
/// assert!(period.date(30).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// The calendar year.
    pub year: i32,
    /// The month, 1 through 12.
    pub month: u32,
}

impl Period {
    /// Creates a period without validating it.
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Checks that the month is 1..=12 and the year lies within the given bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use kpi_engine::models::Period;
    ///
    /// assert!(Period::new(2025, 12).validate(2000, 2100).is_ok());
    /// assert!(Period::new(2025, 13).validate(2000, 2100).is_err());
    /// assert!(Period::new(1999, 1).validate(2000, 2100).is_err());
    /// ```
    pub fn validate(&self, min_year: i32, max_year: i32) -> EngineResult<()> {
        if !(min_year..=max_year).contains(&self.year) {
            return Err(EngineError::InvalidPeriod {
                year: self.year,
                month: self.month,
                message: format!("year must be between {} and {}", min_year, max_year),
            });
        }
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::InvalidPeriod {
                year: self.year,
                month: self.month,
                message: "month must be between 1 and 12".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the date for a day of this month, or `None` if it does not exist.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Returns the number of days in this month, or 0 for an invalid month.
    pub fn days_in_month(&self) -> u32 {
        let Some(first) = self.date(1) else {
            return 0;
        };
        let next_month = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match next_month {
            Some(next) => next.signed_duration_since(first).num_days() as u32,
            None => 31,
        }
    }

    /// Returns true if the date falls within this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// A single holiday as supplied by a caller.
///
/// Either a bare day number or a string holding an ISO date
/// (`"2025-12-16"`) or a day number (`"16"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HolidayInput {
    /// A bare day-of-month number.
    Day(i64),
    /// A date or day number as text.
    Text(String),
}

impl From<i64> for HolidayInput {
    fn from(day: i64) -> Self {
        HolidayInput::Day(day)
    }
}

impl From<&str> for HolidayInput {
    fn from(text: &str) -> Self {
        HolidayInput::Text(text.to_string())
    }
}
