//! Attendance records extracted from a monthly timesheet.
//!
//! One [`AttendanceRecord`] is produced per employee row. Each populated day
//! cell is counted once, as either a letter (absence code or other marker)
//! or a number (hours worked), split by the kind of day it falls on.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::DayType;

/// The eight day-cell counters of an attendance record.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::DayType;
/// use kpi_engine::models::DayCounters;
///
/// let mut counters = DayCounters::default();
/// counters.record(DayType::Saturday, false);
/// counters.record(DayType::Weekday, true);
/// assert_eq!(counters.letters_saturday, 1);
/// assert_eq!(counters.numbers_weekday, 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DayCounters {
    /// Letter cells on ordinary weekdays.
    #[serde(default)]
    pub letters_weekday: u32,
    /// Letter cells on Saturdays.
    #[serde(default)]
    pub letters_saturday: u32,
    /// Letter cells on Sundays.
    #[serde(default)]
    pub letters_sunday: u32,
    /// Letter cells on declared holidays.
    #[serde(default)]
    pub letters_holiday: u32,
    /// Numeric cells on ordinary weekdays.
    #[serde(default)]
    pub numbers_weekday: u32,
    /// Numeric cells on Saturdays.
    #[serde(default)]
    pub numbers_saturday: u32,
    /// Numeric cells on Sundays.
    #[serde(default)]
    pub numbers_sunday: u32,
    /// Numeric cells on declared holidays.
    #[serde(default)]
    pub numbers_holiday: u32,
}

impl DayCounters {
    /// Counts one populated day cell.
    pub fn record(&mut self, day_type: DayType, is_number: bool) {
        let slot = match (is_number, day_type) {
            (false, DayType::Weekday) => &mut self.letters_weekday,
            (false, DayType::Saturday) => &mut self.letters_saturday,
            (false, DayType::Sunday) => &mut self.letters_sunday,
            (false, DayType::Holiday) => &mut self.letters_holiday,
            (true, DayType::Weekday) => &mut self.numbers_weekday,
            (true, DayType::Saturday) => &mut self.numbers_saturday,
            (true, DayType::Sunday) => &mut self.numbers_sunday,
            (true, DayType::Holiday) => &mut self.numbers_holiday,
        };
        *slot = slot.saturating_add(1);
    }

    /// Total letter cells across all day kinds.
    pub fn total_letters(&self) -> u32 {
        [self.letters_weekday, self.letters_saturday, self.letters_sunday, self.letters_holiday]
            .into_iter()
            .fold(0, u32::saturating_add)
    }

    /// Total numeric cells across all day kinds.
    pub fn total_numbers(&self) -> u32 {
        [self.numbers_weekday, self.numbers_saturday, self.numbers_sunday, self.numbers_holiday]
            .into_iter()
            .fold(0, u32::saturating_add)
    }
}

/// Attendance for one employee over one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Employee name as written in the timesheet, trimmed.
    pub name: String,
    /// Day-cell counters.
    #[serde(flatten)]
    pub counters: DayCounters,
    /// Days worked as reported by the timesheet's own total column, if any.
    #[serde(default)]
    pub total_days_worked: Option<Decimal>,
}

impl AttendanceRecord {
    /// Creates an empty record for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: DayCounters::default(),
            total_days_worked: None,
        }
    }
}
