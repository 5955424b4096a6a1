//! Raw spreadsheet cells and the grid they form.
//!
//! The transport layer hands the engine an already-materialized 2-D matrix
//! of cells. Nothing here knows about file formats; a [`Grid`] is just rows
//! of [`Cell`] values, possibly ragged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
///
/// Deserializes untagged from JSON: `null` is [`Cell::Empty`], booleans,
/// numbers and strings map to the matching variant.
///
/// # Example
///
/// ```
/// use kpi_engine::models::Cell;
///
/// let cells: Vec<Cell> = serde_json::from_str(r#"[null, 8, "Б", "7,5"]"#).unwrap();
/// assert_eq!(cells[0], Cell::Empty);
/// assert_eq!(cells[1], Cell::Number(8.0));
/// assert_eq!(cells[2], Cell::Text("Б".to_string()));
/// assert!(cells[3].as_number().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// No value.
    #[default]
    Empty,
    /// A boolean value.
    Bool(bool),
    /// A numeric value as stored by the spreadsheet.
    Number(f64),
    /// A text value.
    Text(String),
}

impl Cell {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Returns true if the cell carries no usable value.
    ///
    /// NaN numbers and whitespace-only text count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Bool(_) => false,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(s) => s.trim().is_empty(),
        }
    }

    /// Returns the trimmed textual rendering of the cell, or `None` if blank.
    ///
    /// Integral numbers render without a fractional part so that a day label
    /// stored as `5.0` reads as `"5"`.
    pub fn display_text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        match self {
            Cell::Empty => None,
            Cell::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            Cell::Number(n) => Some(n.to_string()),
            Cell::Text(s) => Some(s.trim().to_string()),
        }
    }

    /// Returns the cell text if it is a text cell, trimmed.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.trim()),
            _ => None,
        }
    }

    /// Interprets the cell as a number.
    ///
    /// Text is trimmed and a comma is accepted as the decimal separator.
    /// Non-finite values and booleans are not numbers.
    pub fn as_number(&self) -> Option<Decimal> {
        match self {
            Cell::Number(n) if n.is_finite() => Decimal::try_from(*n).ok(),
            Cell::Text(s) => parse_decimal_text(s),
            _ => None,
        }
    }

    /// Returns true if the cell holds a number, finite or not.
    ///
    /// Besides everything [`Cell::as_number`] accepts, this includes infinite
    /// numbers and the text literals `nan`, `inf` and `infinity` (any case,
    /// optionally signed). Those have no `Decimal` value, so `as_number`
    /// still returns `None` for them.
    pub fn reads_as_number(&self) -> bool {
        match self {
            Cell::Number(n) => !n.is_nan(),
            Cell::Text(s) => parse_decimal_text(s).is_some() || is_non_finite_literal(s),
            _ => false,
        }
    }

    /// Interprets the cell as a day-of-month label in `1..=31`.
    ///
    /// Accepts integral numbers and pure digit strings.
    pub fn as_day_number(&self) -> Option<u32> {
        let day = match self {
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                if *n < 0.0 || *n > 31.0 {
                    return None;
                }
                *n as u32
            }
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
                    return None;
                }
                s.parse().ok()?
            }
            _ => return None,
        };
        (1..=31).contains(&day).then_some(day)
    }
}

/// Parses free text as a decimal number, accepting `,` as decimal separator.
pub(crate) fn parse_decimal_text(raw: &str) -> Option<Decimal> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&normalized).ok())
}

fn is_non_finite_literal(raw: &str) -> bool {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    matches!(
        unsigned.to_ascii_lowercase().as_str(),
        "nan" | "inf" | "infinity"
    )
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// A raw 2-D grid of cells, row-major.
///
/// Rows may have different lengths; reading past the end of a row yields
/// an empty cell.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Grid {
    /// Creates a grid from rows of cells.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the width of the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Returns true if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cells of a row, or an empty slice if out of range.
    pub fn row(&self, row: usize) -> &[Cell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the cell at `(row, col)`, or an empty cell if out of range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Iterates over rows with their indices.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows.iter().map(Vec::as_slice).enumerate()
    }
}

impl From<Vec<Vec<Cell>>> for Grid {
    fn from(rows: Vec<Vec<Cell>>) -> Self {
        Self::new(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_untagged_cells() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[null, true, 8, 7.5, "Б"]"#).unwrap();
        assert_eq!(
            cells,
            vec![
                Cell::Empty,
                Cell::Bool(true),
                Cell::Number(8.0),
                Cell::Number(7.5),
                Cell::Text("Б".to_string()),
            ]
        );
    }

    #[test]
    fn test_serialize_empty_as_null() {
        let json = serde_json::to_string(&vec![Cell::Empty, Cell::text("x")]).unwrap();
        assert_eq!(json, r#"[null,"x"]"#);
    }

    #[test]
    fn test_is_blank() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Number(f64::NAN).is_blank());
        assert!(Cell::text("   ").is_blank());
        assert!(!Cell::text("Б").is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_as_number_accepts_comma_decimal() {
        assert_eq!(Cell::text("7,5").as_number(), Some(dec("7.5")));
        assert_eq!(Cell::text(" 8 ").as_number(), Some(dec("8")));
        assert_eq!(Cell::Number(11.0).as_number(), Some(dec("11")));
    }

    #[test]
    fn test_as_number_rejects_letters_and_non_finite() {
        assert_eq!(Cell::text("Б").as_number(), None);
        assert_eq!(Cell::text("ОТ").as_number(), None);
        assert_eq!(Cell::text("").as_number(), None);
        assert_eq!(Cell::Number(f64::INFINITY).as_number(), None);
        assert_eq!(Cell::Bool(true).as_number(), None);
    }

    #[test]
    fn test_reads_as_number_includes_non_finite() {
        assert!(Cell::text("nan").reads_as_number());
        assert!(Cell::text(" -INF ").reads_as_number());
        assert!(Cell::text("7,5").reads_as_number());
        assert!(Cell::Number(f64::INFINITY).reads_as_number());
        assert!(!Cell::Number(f64::NAN).reads_as_number());
        assert!(!Cell::text("Б").reads_as_number());
        assert!(!Cell::Bool(false).reads_as_number());
        assert_eq!(Cell::text("nan").as_number(), None);
    }

    #[test]
    fn test_as_day_number() {
        assert_eq!(Cell::Number(5.0).as_day_number(), Some(5));
        assert_eq!(Cell::text("31").as_day_number(), Some(31));
        assert_eq!(Cell::text("01").as_day_number(), Some(1));
        assert_eq!(Cell::text("0").as_day_number(), None);
        assert_eq!(Cell::text("32").as_day_number(), None);
        assert_eq!(Cell::Number(2.5).as_day_number(), None);
        assert_eq!(Cell::text("Итого").as_day_number(), None);
    }

    #[test]
    fn test_display_text_renders_integral_numbers() {
        assert_eq!(Cell::Number(5.0).display_text(), Some("5".to_string()));
        assert_eq!(Cell::Number(7.5).display_text(), Some("7.5".to_string()));
        assert_eq!(Cell::text("  Иванов  ").display_text(), Some("Иванов".to_string()));
        assert_eq!(Cell::Empty.display_text(), None);
    }

    #[test]
    fn test_grid_out_of_range_reads_empty() {
        let grid = Grid::new(vec![vec![Cell::text("a")], vec![]]);
        assert_eq!(grid.cell(0, 0), &Cell::text("a"));
        assert_eq!(grid.cell(0, 5), &Cell::Empty);
        assert_eq!(grid.cell(9, 0), &Cell::Empty);
        assert!(grid.row(9).is_empty());
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 1);
    }

    #[test]
    fn test_grid_deserializes_from_nested_arrays() {
        let grid: Grid = serde_json::from_str(r#"[["Сотрудник", "01"], ["Иванов", 8]]"#).unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.cell(1, 1), &Cell::Number(8.0));
    }
}
