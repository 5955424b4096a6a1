//! Attendance rules for day-schedule employees.
//!
//! Only letters on ordinary weekdays count as absences. Letters on
//! Saturdays, Sundays and holidays are days the employee was never
//! expected to work. When the timesheet carries its own total of days
//! worked, that figure is authoritative.

use rust_decimal::Decimal;

use crate::models::AttendanceRecord;

/// Days worked and not worked against a norm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleAttendance {
    /// The operative norm.
    pub days_assigned: u32,
    /// Days counted as worked, clamped to `[0, days_assigned]`, unrounded.
    pub days_worked: Decimal,
    /// Days counted as not worked, unrounded.
    pub not_worked: Decimal,
}

/// Computes attendance for a day-schedule employee.
///
/// The absence count is `letters_weekday`. If `total_days_worked` is
/// present it is used as days worked; otherwise days worked is
/// `day_norm − absences`. Either way the figure is clamped to
/// `[0, day_norm]`, and `not_worked = day_norm − days_worked`.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::day_schedule_attendance;
/// use kpi_engine::models::AttendanceRecord;
/// use rust_decimal::Decimal;
///
/// let mut record = AttendanceRecord::new("Иванов");
/// record.counters.letters_weekday = 5;
/// record.total_days_worked = Some(Decimal::from(20));
///
/// let attendance = day_schedule_attendance(&record, 22);
/// assert_eq!(attendance.days_worked, Decimal::from(20)); // not 22 - 5
/// assert_eq!(attendance.not_worked, Decimal::from(2));
/// ```
pub fn day_schedule_attendance(record: &AttendanceRecord, day_norm: u32) -> ScheduleAttendance {
    let norm = Decimal::from(day_norm);
    let absences = Decimal::from(record.counters.letters_weekday);

    let days_worked = record
        .total_days_worked
        .unwrap_or(norm - absences)
        .clamp(Decimal::ZERO, norm);

    ScheduleAttendance {
        days_assigned: day_norm,
        days_worked,
        not_worked: (norm - days_worked).max(Decimal::ZERO),
    }
}
