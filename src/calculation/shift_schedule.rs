//! Attendance rules for shift-schedule employees.
//!
//! Shift workers are expected on Saturdays, so Saturday letters count as
//! absences alongside weekday letters. Sunday and holiday letters never
//! count. The timesheet's own total column is not used for shifts.

use rust_decimal::Decimal;

use crate::models::AttendanceRecord;

use super::ScheduleAttendance;

/// Computes attendance for a shift-schedule employee.
///
/// `absences = letters_weekday + letters_saturday`;
/// `days_worked = clamp(shift_norm − absences, 0, shift_norm)`;
/// `not_worked = absences`, exactly, even when it exceeds the norm.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::shift_schedule_attendance;
/// use kpi_engine::models::AttendanceRecord;
/// use rust_decimal::Decimal;
///
/// let mut record = AttendanceRecord::new("Петров");
/// record.counters.letters_sunday = 4;
///
/// let attendance = shift_schedule_attendance(&record, 30);
/// assert_eq!(attendance.days_worked, Decimal::from(30));
/// assert_eq!(attendance.not_worked, Decimal::ZERO);
/// ```
pub fn shift_schedule_attendance(record: &AttendanceRecord, shift_norm: u32) -> ScheduleAttendance {
    let norm = Decimal::from(shift_norm);
    let absences = Decimal::from(record.counters.letters_weekday)
        + Decimal::from(record.counters.letters_saturday);

    ScheduleAttendance {
        days_assigned: shift_norm,
        days_worked: (norm - absences).clamp(Decimal::ZERO, norm),
        not_worked: absences,
    }
}
