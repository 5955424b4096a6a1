//! Timesheet layout detection.
//!
//! Two layouts are supported. Each one knows how to recognize itself in a
//! raw grid and how to locate its name, day and total columns; reading the
//! rows once the columns are known is shared.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::Grid;

use super::{flat, header_embedded};

/// The supported timesheet layouts.
///
/// # Example
///
/// ```
/// use kpi_engine::timesheet::LayoutKind;
///
/// assert_eq!(serde_json::to_string(&LayoutKind::HeaderEmbedded).unwrap(), "\"header_embedded\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// A report with a preamble; the name header sits somewhere in the
    /// grid and the row beneath it carries day numbers.
    HeaderEmbedded,
    /// A plain table whose first row holds a name column and `01`..`31`
    /// day columns.
    Flat,
}

impl LayoutKind {
    /// Returns true if this layout's signal is present in the grid.
    pub fn matches(self, grid: &Grid, config: &LayoutConfig) -> bool {
        match self {
            LayoutKind::HeaderEmbedded => header_embedded::find_header(grid, config).is_some(),
            LayoutKind::Flat => flat::find_name_column(grid, config).is_some(),
        }
    }

    /// Locates the columns this layout reads.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnrecognizedLayout`] if the layout's signal is
    /// absent, or [`EngineError::MissingDayRow`] if a header-embedded grid
    /// ends at its header row.
    pub fn locate_columns(self, grid: &Grid, config: &LayoutConfig) -> EngineResult<ColumnMap> {
        match self {
            LayoutKind::HeaderEmbedded => header_embedded::locate_columns(grid, config),
            LayoutKind::Flat => flat::locate_columns(grid, config),
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutKind::HeaderEmbedded => write!(f, "header_embedded"),
            LayoutKind::Flat => write!(f, "flat"),
        }
    }
}

/// A column holding one day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumn {
    /// Zero-based column index in the grid.
    pub column: usize,
    /// Day of the month, `1..=31`.
    pub day: u32,
}

/// Where a layout keeps its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Column holding employee names.
    pub name_column: usize,
    /// Day columns in left-to-right order.
    pub day_columns: Vec<DayColumn>,
    /// Column holding the timesheet's own total of days worked, if any.
    pub total_column: Option<usize>,
    /// First row holding employee data.
    pub first_data_row: usize,
}

/// Detects which layout a grid uses.
///
/// The header-embedded layout is tried first, then the flat layout.
///
/// # Errors
///
/// Returns [`EngineError::UnrecognizedLayout`] if neither layout's signal
/// is present.
///
/// # Example
///
/// ```
/// use kpi_engine::config::LayoutConfig;
/// use kpi_engine::models::{Cell, Grid};
/// use kpi_engine::timesheet::{detect_layout, LayoutKind};
///
/// let grid = Grid::new(vec![vec![Cell::from("Сотрудник"), Cell::from("01")]]);
/// let layout = detect_layout(&grid, &LayoutConfig::default()).unwrap();
/// assert_eq!(layout, LayoutKind::Flat);
/// ```
pub fn detect_layout(grid: &Grid, config: &LayoutConfig) -> EngineResult<LayoutKind> {
    let detected = [LayoutKind::HeaderEmbedded, LayoutKind::Flat]
        .into_iter()
        .find(|kind| kind.matches(grid, config));

    match detected {
        Some(kind) => {
            debug!(
                layout = %kind,
                rows = grid.row_count(),
                columns = grid.column_count(),
                "Timesheet layout detected"
            );
            Ok(kind)
        }
        None => Err(unrecognized(config)),
    }
}

pub(super) fn unrecognized(config: &LayoutConfig) -> EngineError {
    EngineError::UnrecognizedLayout {
        name_header: config.name_header.clone(),
        flat_columns: config
            .flat_name_columns
            .iter()
            .map(|label| format!("'{}'", label))
            .collect::<Vec<_>>()
            .join(" or "),
    }
}
