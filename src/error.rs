//! Error types for the KPI engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that aborts a whole request. Per-employee problems
//! are not errors here; they are reported as [`KpiError`](crate::models::KpiError)
//! records alongside successful results.

use thiserror::Error;

/// The main error type for the KPI engine.
///
/// # Example
///
/// ```
/// use kpi_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The grid matches none of the supported timesheet layouts.
    #[error("Unrecognized timesheet layout: no '{name_header}' header cell and no {flat_columns} column")]
    UnrecognizedLayout {
        /// The header cell looked for by the header-embedded layout.
        name_header: String,
        /// The name-column labels looked for by the flat layout.
        flat_columns: String,
    },

    /// The header-embedded layout was found but the day-number row is missing.
    #[error("Timesheet has no day-number row after the header in row {header_row}")]
    MissingDayRow {
        /// Zero-based row index of the name header.
        header_row: usize,
    },

    /// The requested year or month is out of range.
    #[error("Invalid period {year}-{month:02}: {message}")]
    InvalidPeriod {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
        /// What is wrong with it.
        message: String,
    },

    /// Neither the day norm nor the shift norm is positive.
    #[error("Invalid norms: day norm {day_norm} and shift norm {shift_norm}; at least one must be positive")]
    InvalidNorms {
        /// The requested day-schedule norm.
        day_norm: i32,
        /// The requested shift-schedule norm.
        shift_norm: i32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
