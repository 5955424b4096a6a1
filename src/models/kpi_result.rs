//! KPI calculation output models.
//!
//! A calculation run produces an ordered list of [`KpiResult`] rows and an
//! ordered list of [`KpiError`] rows. Each distinct employee name appears in
//! at most one of the two lists, at most once.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DayCounters, ScheduleType};
use crate::error::{EngineError, EngineResult};

/// The computed payout for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiResult {
    /// Employee name as written in the timesheet.
    pub name: String,
    /// The schedule regime the payout was computed under.
    pub schedule_type: ScheduleType,
    /// The operative norm (day norm or shift norm).
    pub days_assigned: u32,
    /// Days counted as worked, clamped to `[0, days_assigned]`.
    pub days_worked: Decimal,
    /// Days counted as not worked.
    pub not_worked: Decimal,
    /// Attendance counters, passed through for audit.
    #[serde(flatten)]
    pub counters: DayCounters,
    /// Attendance percentage in `[0, 100]`, two decimals.
    pub work_percent: Decimal,
    /// The full KPI entitlement from the roster.
    pub kpi_sum: Decimal,
    /// The payout amount, two decimals.
    pub kpi_final: Decimal,
    /// Department from the roster.
    pub department: String,
    /// Category code from the roster.
    pub category_code: String,
}

/// Why an employee produced no [`KpiResult`].
///
/// # Example
///
/// ```
/// use kpi_engine::models::KpiErrorKind;
///
/// let json = serde_json::to_string(&KpiErrorKind::NoKpiMapping).unwrap();
/// assert_eq!(json, "\"NO_KPI_MAPPING\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KpiErrorKind {
    /// The name already appeared earlier in the same timesheet.
    Duplicate,
    /// No roster entry matches the name.
    NoKpiMapping,
    /// The roster marks the employee as a student.
    Student,
    /// The norm for the employee's schedule is not positive.
    InvalidPlan,
    /// Computation failed unexpectedly.
    CalculationError,
}

impl std::fmt::Display for KpiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            KpiErrorKind::Duplicate => "DUPLICATE",
            KpiErrorKind::NoKpiMapping => "NO_KPI_MAPPING",
            KpiErrorKind::Student => "STUDENT",
            KpiErrorKind::InvalidPlan => "INVALID_PLAN",
            KpiErrorKind::CalculationError => "CALCULATION_ERROR",
        };
        f.write_str(label)
    }
}

/// A per-employee failure record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiError {
    /// Employee name as written in the timesheet.
    pub name: String,
    /// The failure category.
    pub kind: KpiErrorKind,
    /// Free-text diagnostic.
    pub details: String,
}

impl KpiError {
    /// Creates a new error record.
    pub fn new(name: impl Into<String>, kind: KpiErrorKind, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            details: details.into(),
        }
    }
}

/// Aggregate counts for a calculation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Number of employees with a computed payout.
    pub processed: usize,
    /// Number of employees reported as errors.
    pub failed: usize,
    /// Sum of all `kpi_final` amounts.
    pub total_kpi_final: Decimal,
}

/// The ordered results and errors of one calculation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KpiOutcome {
    /// Successful payouts, in timesheet order.
    pub results: Vec<KpiResult>,
    /// Per-employee failures, in timesheet order.
    pub errors: Vec<KpiError>,
}

impl KpiOutcome {
    /// Computes the summary counts for this outcome.
    ///
    /// Fails with [`EngineError::CalculationError`] if the payout total does
    /// not fit in a `Decimal`.
    pub fn summary(&self) -> EngineResult<KpiSummary> {
        let total_kpi_final = self
            .results
            .iter()
            .try_fold(Decimal::ZERO, |total, r| total.checked_add(r.kpi_final))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "total kpi_final of {} payouts overflows",
                    self.results.len()
                ),
            })?;

        Ok(KpiSummary {
            processed: self.results.len(),
            failed: self.errors.len(),
            total_kpi_final,
        })
    }

    /// Returns the errors of a given kind.
    pub fn errors_of(&self, kind: KpiErrorKind) -> impl Iterator<Item = &KpiError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}
