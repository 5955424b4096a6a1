//! KPI calculation over a batch of attendance records.
//!
//! This module joins extracted attendance against the roster and applies
//! the schedule-specific rules. Every record ends up as exactly one result
//! or one classified error; a failure for one employee never aborts the
//! batch.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, KpiError, KpiErrorKind, KpiOutcome, KpiResult, RosterEntry, ScheduleType,
};

use super::{
    RosterIndex, ScheduleAttendance, calculate_payout, day_schedule_attendance, name_key,
    round_2dp, shift_schedule_attendance,
};

/// The day norms a calculation runs against.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::Norms;
/// use kpi_engine::models::ScheduleType;
///
/// let norms = Norms::new(22, 0);
/// assert!(norms.validate().is_ok());
/// assert_eq!(norms.for_schedule(ScheduleType::Day), Some(22));
/// assert_eq!(norms.for_schedule(ScheduleType::Shift), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Norms {
    /// Working days expected of a day-schedule employee.
    pub day_norm: i32,
    /// Shifts expected of a shift-schedule employee.
    pub shift_norm: i32,
}

impl Norms {
    /// Creates a norms pair.
    pub fn new(day_norm: i32, shift_norm: i32) -> Self {
        Self {
            day_norm,
            shift_norm,
        }
    }

    /// Checks that at least one norm is positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.day_norm <= 0 && self.shift_norm <= 0 {
            return Err(EngineError::InvalidNorms {
                day_norm: self.day_norm,
                shift_norm: self.shift_norm,
            });
        }
        Ok(())
    }

    /// Returns the positive norm for a schedule, or `None` if it is not configured.
    pub fn for_schedule(&self, schedule_type: ScheduleType) -> Option<u32> {
        let norm = match schedule_type {
            ScheduleType::Day => self.day_norm,
            ScheduleType::Shift => self.shift_norm,
        };
        u32::try_from(norm).ok().filter(|n| *n > 0)
    }
}

/// Calculates KPI payouts for a batch of attendance records.
///
/// Records are processed in input order and results keep that order. Per
/// record:
///
/// 1. Records with a blank name are skipped.
/// 2. A name seen earlier in the batch (ignoring case and surrounding
///    whitespace) yields [`KpiErrorKind::Duplicate`].
/// 3. A name missing from the roster yields [`KpiErrorKind::NoKpiMapping`].
/// 4. A student roster entry yields [`KpiErrorKind::Student`].
/// 5. A schedule whose norm is not positive yields [`KpiErrorKind::InvalidPlan`].
/// 6. Otherwise the schedule rules and payout formula produce a [`KpiResult`];
///    any failure there yields [`KpiErrorKind::CalculationError`].
///
/// # Errors
///
/// Returns [`EngineError::InvalidNorms`] if neither norm is positive.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::{calculate_kpi, Norms};
/// use kpi_engine::models::{AttendanceRecord, RosterEntry, ScheduleType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut record = AttendanceRecord::new("Иванов");
/// record.counters.letters_weekday = 2;
///
/// let roster = vec![RosterEntry {
///     id: 1,
///     name: "Иванов".to_string(),
///     kpi_sum: Decimal::from(15000),
///     schedule_type: ScheduleType::Day,
///     department: "ОРИТ".to_string(),
///     category_code: "1".to_string(),
/// }];
///
/// let outcome = calculate_kpi(&[record], &roster, Norms::new(22, 30)).unwrap();
/// assert_eq!(outcome.results[0].kpi_final, Decimal::from_str("13636.36").unwrap());
/// assert!(outcome.errors.is_empty());
/// ```
pub fn calculate_kpi(
    records: &[AttendanceRecord],
    roster: &[RosterEntry],
    norms: Norms,
) -> EngineResult<KpiOutcome> {
    norms.validate()?;

    let index = RosterIndex::build(roster);
    let mut seen: HashSet<String> = HashSet::new();
    let mut outcome = KpiOutcome::default();

    for record in records {
        let name = record.name.trim();
        if name.is_empty() {
            continue;
        }

        if !seen.insert(name_key(name)) {
            outcome.errors.push(KpiError::new(
                name,
                KpiErrorKind::Duplicate,
                "name appears more than once in the timesheet",
            ));
            continue;
        }

        let Some(entry) = index.get(name) else {
            outcome.errors.push(KpiError::new(
                name,
                KpiErrorKind::NoKpiMapping,
                "no roster entry for this name",
            ));
            continue;
        };

        if entry.is_student() {
            outcome.errors.push(KpiError::new(
                name,
                KpiErrorKind::Student,
                format!("category code {} (student), KPI not calculated", entry.category_code),
            ));
            continue;
        }

        let Some(norm) = norms.for_schedule(entry.schedule_type) else {
            outcome.errors.push(KpiError::new(
                name,
                KpiErrorKind::InvalidPlan,
                format!("no positive norm configured for {} schedule", entry.schedule_type),
            ));
            continue;
        };

        match calculate_employee(record, entry, norm) {
            Ok(result) => {
                debug!(
                    employee = %result.name,
                    schedule = %result.schedule_type,
                    work_percent = %result.work_percent,
                    kpi_final = %result.kpi_final,
                    "KPI calculated"
                );
                outcome.results.push(result);
            }
            Err(err) => {
                warn!(employee = %name, error = %err, "KPI calculation failed");
                outcome.errors.push(KpiError::new(
                    name,
                    KpiErrorKind::CalculationError,
                    err.to_string(),
                ));
            }
        }
    }

    Ok(outcome)
}

/// Calculates the payout for one employee already joined to the roster.
fn calculate_employee(
    record: &AttendanceRecord,
    entry: &RosterEntry,
    norm: u32,
) -> EngineResult<KpiResult> {
    let ScheduleAttendance {
        days_assigned,
        days_worked,
        not_worked,
    } = match entry.schedule_type {
        ScheduleType::Day => day_schedule_attendance(record, norm),
        ScheduleType::Shift => shift_schedule_attendance(record, norm),
    };

    let payout = calculate_payout(days_worked, days_assigned, entry.kpi_sum)?;

    Ok(KpiResult {
        name: record.name.trim().to_string(),
        schedule_type: entry.schedule_type,
        days_assigned,
        days_worked: round_2dp(days_worked),
        not_worked: round_2dp(not_worked),
        counters: record.counters,
        work_percent: payout.work_percent,
        kpi_sum: entry.kpi_sum,
        kpi_final: payout.kpi_final,
        department: entry.department.clone(),
        category_code: entry.category_code.clone(),
    })
}
