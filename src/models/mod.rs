//! Core data models for the KPI engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod cell;
mod kpi_result;
mod period;
mod roster;

pub use attendance::{AttendanceRecord, DayCounters};
pub use cell::{Cell, Grid};
pub use kpi_result::{KpiError, KpiErrorKind, KpiOutcome, KpiResult, KpiSummary};
pub use period::{HolidayInput, Period};
pub use roster::{
    RosterEntry, STUDENT_CATEGORY_CODE, ScheduleType, lenient_optional_roster, lenient_roster,
};
