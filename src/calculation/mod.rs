//! Calculation logic for the KPI engine.
//!
//! This module contains the day classification calendar, the day- and
//! shift-schedule attendance rules, the payout formula, the roster lookup,
//! and the batch calculator that ties them together.

mod day_detection;
mod day_schedule;
mod kpi_calculator;
mod payout;
mod roster_index;
mod shift_schedule;

pub use day_detection::{
    CalendarDay, DayType, HolidaySet, classify_day, get_day_type, month_calendar,
    parse_holiday_field, working_days_in_month,
};
pub use day_schedule::{ScheduleAttendance, day_schedule_attendance};
pub use kpi_calculator::{Norms, calculate_kpi};
pub use payout::{PayoutResult, calculate_payout, round_2dp};
pub use roster_index::{RosterIndex, name_key};
pub use shift_schedule::shift_schedule_attendance;
