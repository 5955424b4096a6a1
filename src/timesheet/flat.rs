//! The flat layout: a plain table with a header row.
//!
//! Row 0 holds the column labels. The name column is one of the configured
//! aliases and day columns are labeled with two-digit strings `01`..`31`.
//! This layout has no total-days column.

use crate::config::LayoutConfig;
use crate::error::EngineResult;
use crate::models::{Cell, Grid};

use super::layout::{ColumnMap, DayColumn, unrecognized};

const HEADER_ROW: usize = 0;

/// Finds the name column in the header row.
pub(super) fn find_name_column(grid: &Grid, config: &LayoutConfig) -> Option<usize> {
    grid.row(HEADER_ROW).iter().position(|cell| {
        cell.as_text()
            .is_some_and(|text| config.is_flat_name_column(text))
    })
}

/// Locates the name and day columns.
pub(super) fn locate_columns(grid: &Grid, config: &LayoutConfig) -> EngineResult<ColumnMap> {
    let name_column = find_name_column(grid, config).ok_or_else(|| unrecognized(config))?;

    let day_columns = grid
        .row(HEADER_ROW)
        .iter()
        .enumerate()
        .filter_map(|(column, cell)| two_digit_day(cell).map(|day| DayColumn { column, day }))
        .collect();

    Ok(ColumnMap {
        name_column,
        day_columns,
        total_column: None,
        first_data_row: HEADER_ROW + 1,
    })
}

/// Parses a `01`..`31` text label.
fn two_digit_day(cell: &Cell) -> Option<u32> {
    let label = cell.as_text()?;
    if label.len() != 2 || !label.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    label.parse().ok().filter(|day| (1..=31).contains(day))
}
