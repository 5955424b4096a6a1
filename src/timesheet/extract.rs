//! Row extraction shared by all layouts.
//!
//! Once a layout has located its columns, every row below the header is
//! read the same way: a name, one counter bump per populated day cell, and
//! optionally the timesheet's own total of days worked.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculation::{DayType, HolidaySet, classify_day};
use crate::config::LayoutConfig;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, Cell, Grid, Period};

use super::layout::{ColumnMap, LayoutKind, detect_layout};

/// Attendance extracted from one timesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timesheet {
    /// The detected layout.
    pub layout: LayoutKind,
    /// One record per employee row, in grid order.
    pub records: Vec<AttendanceRecord>,
}

/// What a populated day cell means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    /// A non-numeric marker such as an absence code.
    Letter,
    /// Hours or units worked.
    Number,
}

/// Classifies a day cell, or returns `None` if it is not applicable.
///
/// Blank cells and the configured skip markers (`-`, `В`) mean "not
/// applicable" and are not counted at all. Anything that reads as a
/// number, with `,` accepted as the decimal separator and `nan`/`inf`
/// included, is a number; everything else is a letter.
///
/// # Example
///
/// ```
/// use kpi_engine::config::LayoutConfig;
/// use kpi_engine::models::Cell;
/// use kpi_engine::timesheet::{classify_cell, CellMark};
///
/// let config = LayoutConfig::default();
/// assert_eq!(classify_cell(&Cell::from("7,5"), &config), Some(CellMark::Number));
/// assert_eq!(classify_cell(&Cell::from("Б"), &config), Some(CellMark::Letter));
/// assert_eq!(classify_cell(&Cell::from("в"), &config), None);
/// assert_eq!(classify_cell(&Cell::Empty, &config), None);
/// ```
pub fn classify_cell(cell: &Cell, config: &LayoutConfig) -> Option<CellMark> {
    if cell.is_blank() {
        return None;
    }
    match cell {
        Cell::Number(_) => Some(CellMark::Number),
        Cell::Text(text) if config.is_skip_marker(text) => None,
        Cell::Text(_) if cell.reads_as_number() => Some(CellMark::Number),
        _ => Some(CellMark::Letter),
    }
}

/// Reads employee rows using already-located columns.
///
/// Rows with a blank name, or whose name repeats the name header, are
/// skipped. Malformed cells are treated as blank; nothing here fails.
pub fn read_rows(
    grid: &Grid,
    columns: &ColumnMap,
    period: Period,
    holidays: &HolidaySet,
    config: &LayoutConfig,
) -> Vec<AttendanceRecord> {
    let day_types: Vec<(usize, DayType)> = columns
        .day_columns
        .iter()
        .map(|dc| (dc.column, classify_day(period, dc.day, holidays)))
        .collect();
    let header = config.name_header.trim();

    let mut records = Vec::new();
    for (row, cells) in grid.rows().skip(columns.first_data_row) {
        let Some(name) = cells
            .get(columns.name_column)
            .and_then(Cell::display_text)
        else {
            continue;
        };
        if name == header {
            continue;
        }

        let mut record = AttendanceRecord::new(name);
        for &(column, day_type) in &day_types {
            match classify_cell(grid.cell(row, column), config) {
                Some(CellMark::Number) => record.counters.record(day_type, true),
                Some(CellMark::Letter) => record.counters.record(day_type, false),
                None => {}
            }
        }
        record.total_days_worked = columns
            .total_column
            .and_then(|column| grid.cell(row, column).as_number());

        records.push(record);
    }
    records
}

/// Detects the layout of a grid and extracts one attendance record per employee row.
///
/// # Errors
///
/// Returns [`EngineError::UnrecognizedLayout`](crate::error::EngineError::UnrecognizedLayout)
/// if no layout matches, or
/// [`EngineError::MissingDayRow`](crate::error::EngineError::MissingDayRow) if a
/// header-embedded grid has no day-number row.
///
/// # Example
///
/// ```
/// use kpi_engine::calculation::HolidaySet;
/// use kpi_engine::config::LayoutConfig;
/// use kpi_engine::models::{Cell, Grid, Period};
/// use kpi_engine::timesheet::{detect_and_extract, LayoutKind};
///
/// // 2025-12-06 is a Saturday
/// let grid = Grid::new(vec![
///     vec![Cell::from("Сотрудник"), Cell::from("05"), Cell::from("06")],
///     vec![Cell::from("Иванов"), Cell::from("8"), Cell::from("Б")],
/// ]);
/// let timesheet = detect_and_extract(
///     &grid,
///     Period::new(2025, 12),
///     &HolidaySet::default(),
///     &LayoutConfig::default(),
/// ).unwrap();
///
/// assert_eq!(timesheet.layout, LayoutKind::Flat);
/// assert_eq!(timesheet.records[0].counters.numbers_weekday, 1);
/// assert_eq!(timesheet.records[0].counters.letters_saturday, 1);
/// ```
pub fn detect_and_extract(
    grid: &Grid,
    period: Period,
    holidays: &HolidaySet,
    config: &LayoutConfig,
) -> EngineResult<Timesheet> {
    let layout = detect_layout(grid, config)?;
    let columns = layout.locate_columns(grid, config)?;
    let records = read_rows(grid, &columns, period, holidays, config);

    debug!(
        layout = %layout,
        day_columns = columns.day_columns.len(),
        has_total_column = columns.total_column.is_some(),
        records = records.len(),
        "Timesheet extracted"
    );

    Ok(Timesheet { layout, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const HEADER: &str = "АТЫ-жөні (толығымен)";

    fn t(s: &str) -> Cell {
        Cell::from(s)
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    fn extract(grid: &Grid, period: Period, holidays: &HolidaySet) -> EngineResult<Timesheet> {
        detect_and_extract(grid, period, holidays, &LayoutConfig::default())
    }

    // ==========================================================================
    // Cell classification
    // ==========================================================================
    #[test]
    fn test_classify_cell() {
        let config = LayoutConfig::default();
        assert_eq!(classify_cell(&n(8.0), &config), Some(CellMark::Number));
        assert_eq!(classify_cell(&t(" 12 "), &config), Some(CellMark::Number));
        assert_eq!(classify_cell(&t("ОТ"), &config), Some(CellMark::Letter));
        assert_eq!(classify_cell(&t("8ч"), &config), Some(CellMark::Letter));
        assert_eq!(classify_cell(&Cell::Bool(true), &config), Some(CellMark::Letter));
        assert_eq!(classify_cell(&t("-"), &config), None);
        assert_eq!(classify_cell(&t(" В "), &config), None);
        assert_eq!(classify_cell(&t("   "), &config), None);
        assert_eq!(classify_cell(&n(f64::NAN), &config), None);
    }

    #[test]
    fn test_classify_non_finite_text_as_number() {
        let config = LayoutConfig::default();
        for text in ["nan", "NaN", "inf", "-Infinity", " +inf "] {
            assert_eq!(classify_cell(&t(text), &config), Some(CellMark::Number), "{}", text);
        }
        assert_eq!(classify_cell(&n(f64::INFINITY), &config), Some(CellMark::Number));
        assert_eq!(classify_cell(&t("info"), &config), Some(CellMark::Letter));
        assert_eq!(classify_cell(&t("--inf"), &config), Some(CellMark::Letter));
    }

    // ==========================================================================
    // Header-embedded layout
    // ==========================================================================
    #[test]
    fn test_header_embedded_counts_by_day_type() {
        // January 2026: 1st Thu, 3rd Sat, 4th Sun, 5th Mon
        let grid = Grid::new(vec![
            vec![t("Табель учета рабочего времени")],
            vec![t("№"), t(HEADER), t("Лауазымы")],
            vec![Cell::Empty, Cell::Empty, Cell::Empty, n(1.0), n(3.0), n(4.0), n(5.0)],
            vec![n(1.0), t("Иванов И.И."), t("врач"), t("Б"), n(8.0), t("ОТ"), t("7,5")],
            vec![n(2.0), t("Петров П.П."), t("м/с"), t("-"), t("В"), n(12.0), t("К")],
        ]);
        let holidays = HolidaySet::from_days([1]);
        let timesheet = extract(&grid, Period::new(2026, 1), &holidays).unwrap();

        assert_eq!(timesheet.layout, LayoutKind::HeaderEmbedded);
        assert_eq!(timesheet.records.len(), 2);

        let first = &timesheet.records[0];
        assert_eq!(first.name, "Иванов И.И.");
        assert_eq!(first.counters.letters_holiday, 1);
        assert_eq!(first.counters.numbers_saturday, 1);
        assert_eq!(first.counters.letters_sunday, 1);
        assert_eq!(first.counters.numbers_weekday, 1);
        assert_eq!(first.total_days_worked, None);

        let second = &timesheet.records[1];
        assert_eq!(second.counters.total_letters(), 1);
        assert_eq!(second.counters.letters_weekday, 1);
        assert_eq!(second.counters.numbers_sunday, 1);
    }

    #[test]
    fn test_header_embedded_reads_total_column() {
        let grid = Grid::new(vec![
            vec![t(HEADER), Cell::Empty, Cell::Empty, t("Өтелген күндер жиынтығы")],
            vec![Cell::Empty, n(1.0), n(2.0)],
            vec![t("Иванов"), n(8.0), n(8.0), n(20.0)],
            vec![t("Петров"), n(8.0), t("Б"), t("19,5")],
            vec![t("Сидоров"), n(8.0), n(8.0), t("н/д")],
        ]);
        let timesheet = extract(&grid, Period::new(2025, 12), &HolidaySet::default()).unwrap();
        let totals: Vec<_> = timesheet.records.iter().map(|r| r.total_days_worked).collect();
        assert_eq!(
            totals,
            vec![
                Some(Decimal::from(20)),
                Some(Decimal::from_str("19.5").unwrap()),
                None
            ]
        );
    }

    #[test]
    fn test_header_embedded_skips_blank_and_repeated_header_names() {
        let grid = Grid::new(vec![
            vec![t(HEADER)],
            vec![Cell::Empty, t("1")],
            vec![t("  "), t("Б")],
            vec![Cell::Empty, t("Б")],
            vec![t(HEADER), t("Б")],
            vec![t(" Ким "), t("Б")],
            vec![n(f64::NAN), t("Б")],
        ]);
        let timesheet = extract(&grid, Period::new(2025, 12), &HolidaySet::default()).unwrap();
        assert_eq!(timesheet.records.len(), 1);
        assert_eq!(timesheet.records[0].name, "Ким");
    }

    #[test]
    fn test_ghost_trailing_day_reads_as_weekday() {
        // November has 30 days; column 31 still gets counted
        let grid = Grid::new(vec![
            vec![t(HEADER)],
            vec![Cell::Empty, n(31.0)],
            vec![t("Иванов"), t("Б")],
        ]);
        let timesheet = extract(&grid, Period::new(2025, 11), &HolidaySet::default()).unwrap();
        assert_eq!(timesheet.records[0].counters.letters_weekday, 1);
    }

    #[test]
    fn test_ragged_rows_read_as_blank() {
        let grid = Grid::new(vec![
            vec![t(HEADER)],
            vec![Cell::Empty, n(1.0), n(2.0), n(3.0)],
            vec![t("Иванов"), n(8.0)],
        ]);
        let timesheet = extract(&grid, Period::new(2025, 12), &HolidaySet::default()).unwrap();
        assert_eq!(timesheet.records[0].counters.total_numbers(), 1);
        assert_eq!(timesheet.records[0].counters.total_letters(), 0);
    }

    #[test]
    fn test_missing_day_row_is_terminal() {
        let grid = Grid::new(vec![vec![t("шапка")], vec![t(HEADER)]]);
        let result = extract(&grid, Period::new(2025, 12), &HolidaySet::default());
        assert!(matches!(result, Err(EngineError::MissingDayRow { header_row: 1 })));
    }

    // ==========================================================================
    // Flat layout
    // ==========================================================================
    #[test]
    fn test_flat_layout_has_no_total() {
        let grid = Grid::new(vec![
            vec![t("Сотрудник"), t("01"), t("02"), t("өтелген күндер жиынтығы")],
            vec![t("Иванов"), t("8"), t("Б"), n(20.0)],
            vec![Cell::Empty, t("8"), t("8")],
        ]);
        let timesheet = extract(&grid, Period::new(2025, 12), &HolidaySet::default()).unwrap();
        assert_eq!(timesheet.layout, LayoutKind::Flat);
        assert_eq!(timesheet.records.len(), 1);
        let record = &timesheet.records[0];
        assert_eq!(record.total_days_worked, None);
        assert_eq!(record.counters.numbers_weekday, 1);
        assert_eq!(record.counters.letters_weekday, 1);
    }

    #[test]
    fn test_flat_numeric_names_are_rendered() {
        let grid = Grid::new(vec![vec![t("Employee"), t("01")], vec![n(1042.0), t("8")]]);
        let timesheet = extract(&grid, Period::new(2025, 12), &HolidaySet::default()).unwrap();
        assert_eq!(timesheet.records[0].name, "1042");
    }

    #[test]
    fn test_unrecognized_grid_is_terminal() {
        let grid = Grid::new(vec![vec![t("ФИО"), t("01")], vec![t("Иванов"), t("8")]]);
        let result = extract(&grid, Period::new(2025, 12), &HolidaySet::default());
        assert!(matches!(result, Err(EngineError::UnrecognizedLayout { .. })));
    }
}
