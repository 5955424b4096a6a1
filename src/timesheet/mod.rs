//! Timesheet parsing.
//!
//! This module turns a raw grid of cells into attendance records. It
//! detects which of the supported layouts the grid uses, locates the name,
//! day and total columns for that layout, and counts each populated day
//! cell as a letter or a number on its kind of day.

mod extract;
mod flat;
mod header_embedded;
mod layout;
mod pipeline;

pub use extract::{CellMark, Timesheet, classify_cell, detect_and_extract, read_rows};
pub use layout::{ColumnMap, DayColumn, LayoutKind, detect_layout};
pub use pipeline::{ProcessedTimesheet, process_timesheet};
