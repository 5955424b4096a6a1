//! The end-to-end pipeline from raw grid to KPI outcome.

use serde::Serialize;
use tracing::info;

use crate::calculation::{HolidaySet, Norms, calculate_kpi};
use crate::config::LayoutConfig;
use crate::error::EngineResult;
use crate::models::{Grid, KpiOutcome, Period, RosterEntry};

use super::{LayoutKind, detect_and_extract};

/// The outcome of processing one timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedTimesheet {
    /// The detected layout.
    pub layout: LayoutKind,
    /// Per-employee results and errors.
    pub outcome: KpiOutcome,
}

/// Detects, extracts and calculates in one pass.
///
/// Norms are checked before the grid is read so that an unusable request
/// fails without doing any work.
///
/// # Errors
///
/// Any terminal error from detection, extraction or norm validation, or a
/// `CalculationError` if the payout total overflows.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::{HolidaySet, Norms};
/// use kpi_engine::config::LayoutConfig;
/// use kpi_engine::models::{Cell, Grid, Period};
/// use kpi_engine::timesheet::process_timesheet;
///
/// let grid = Grid::new(vec![vec![Cell::from("Employee"), Cell::from("01")]]);
/// let processed = process_timesheet(
///     &grid,
///     Period::new(2025, 12),
///     &HolidaySet::default(),
///     &[],
///     Norms::new(22, 0),
///     &LayoutConfig::default(),
/// ).unwrap();
/// assert!(processed.outcome.results.is_empty());
/// ```
pub fn process_timesheet(
    grid: &Grid,
    period: Period,
    holidays: &HolidaySet,
    roster: &[RosterEntry],
    norms: Norms,
    config: &LayoutConfig,
) -> EngineResult<ProcessedTimesheet> {
    norms.validate()?;

    let timesheet = detect_and_extract(grid, period, holidays, config)?;
    let outcome = calculate_kpi(&timesheet.records, roster, norms)?;

    let summary = outcome.summary()?;
    info!(
        period = %period,
        layout = %timesheet.layout,
        processed = summary.processed,
        failed = summary.failed,
        "Timesheet processed"
    );

    Ok(ProcessedTimesheet {
        layout: timesheet.layout,
        outcome,
    })
}
