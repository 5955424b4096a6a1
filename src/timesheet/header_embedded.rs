//! The header-embedded layout.
//!
//! Typical of the Kazakh-language hospital report template: a free-form
//! preamble, then a header row with the name-column marker, then a row of
//! day numbers. A "total days worked" column may sit near the header,
//! sometimes in a merged cell a row or two above it.

use crate::config::LayoutConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::Grid;

use super::layout::{ColumnMap, DayColumn, unrecognized};

/// Rows above the header searched for the total-days marker.
const TOTAL_MARKER_ROWS_ABOVE: usize = 2;
/// Rows below the header searched for the total-days marker.
const TOTAL_MARKER_ROWS_BELOW: usize = 4;

/// Finds the first cell, in row order, holding the name header.
///
/// Returns `(row, column)`.
pub(super) fn find_header(grid: &Grid, config: &LayoutConfig) -> Option<(usize, usize)> {
    let header = config.name_header.trim();
    grid.rows().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|cell| cell.as_text() == Some(header))
            .map(|col| (row, col))
    })
}

/// Locates the name, day and total columns.
pub(super) fn locate_columns(grid: &Grid, config: &LayoutConfig) -> EngineResult<ColumnMap> {
    let (header_row, name_column) =
        find_header(grid, config).ok_or_else(|| unrecognized(config))?;

    let day_row = header_row + 1;
    if day_row >= grid.row_count() {
        return Err(EngineError::MissingDayRow { header_row });
    }

    let day_columns = grid
        .row(day_row)
        .iter()
        .enumerate()
        .filter_map(|(column, cell)| cell.as_day_number().map(|day| DayColumn { column, day }))
        .collect();

    Ok(ColumnMap {
        name_column,
        day_columns,
        total_column: find_total_column(grid, config, header_row),
        first_data_row: day_row + 1,
    })
}

/// Searches the rows around the header for the total-days marker.
fn find_total_column(grid: &Grid, config: &LayoutConfig, header_row: usize) -> Option<usize> {
    let first = header_row.saturating_sub(TOTAL_MARKER_ROWS_ABOVE);
    let last = header_row + TOTAL_MARKER_ROWS_BELOW;

    (first..=last).find_map(|row| {
        grid.row(row).iter().position(|cell| {
            cell.as_text()
                .is_some_and(|text| config.is_total_days_marker(text))
        })
    })
}
