//! Configuration types for the KPI engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every field has a
//! default, so an empty `engine.yaml` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::models::{RosterEntry, lenient_roster};

/// The literal markers used to recognize timesheet layouts.
///
/// # Example
///
/// ```
/// use kpi_engine::config::LayoutConfig;
///
/// let layout = LayoutConfig::default();
/// assert_eq!(layout.name_header, "АТЫ-жөні (толығымен)");
/// assert!(layout.is_skip_marker(" в "));
/// assert!(!layout.is_skip_marker("Б"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Header cell marking the name column of the header-embedded layout.
    pub name_header: String,
    /// Header cell marking the "total days worked" column, matched ignoring case.
    pub total_days_marker: String,
    /// Name-column labels accepted by the flat layout.
    pub flat_name_columns: Vec<String>,
    /// Cell values meaning "not applicable", matched ignoring case.
    pub skip_markers: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            name_header: "АТЫ-жөні (толығымен)".to_string(),
            total_days_marker: "өтелген күндер жиынтығы".to_string(),
            flat_name_columns: vec!["Сотрудник".to_string(), "Employee".to_string()],
            skip_markers: vec!["-".to_string(), "В".to_string()],
        }
    }
}

impl LayoutConfig {
    /// Returns true if the cell text is a "not applicable" marker.
    pub fn is_skip_marker(&self, text: &str) -> bool {
        let value = text.trim().to_uppercase();
        self.skip_markers
            .iter()
            .any(|marker| marker.trim().to_uppercase() == value)
    }

    /// Returns true if the cell text is the total-days marker.
    pub fn is_total_days_marker(&self, text: &str) -> bool {
        text.trim().to_lowercase() == self.total_days_marker.trim().to_lowercase()
    }

    /// Returns true if the cell text is one of the flat layout's name-column labels.
    pub fn is_flat_name_column(&self, text: &str) -> bool {
        let text = text.trim();
        self.flat_name_columns.iter().any(|label| label.trim() == text)
    }
}

/// The accepted range of reporting years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodBounds {
    /// Earliest accepted year.
    pub min_year: i32,
    /// Latest accepted year.
    pub max_year: i32,
}

impl Default for PeriodBounds {
    fn default() -> Self {
        Self {
            min_year: 2000,
            max_year: 2100,
        }
    }
}

/// Norms applied when a request does not supply its own.
///
/// A missing day norm falls back to the number of working weekdays in the
/// requested month. A missing shift norm means shift employees get
/// `INVALID_PLAN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultNorms {
    /// Default day norm.
    pub day_norm: Option<i32>,
    /// Default shift norm.
    pub shift_norm: Option<i32>,
}

/// The contents of `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layout markers.
    pub layout: LayoutConfig,
    /// Accepted reporting years.
    pub period: PeriodBounds,
    /// Fallback norms.
    pub norms: DefaultNorms,
}

/// The contents of `roster.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RosterFile {
    /// The roster snapshot; malformed rows are skipped.
    #[serde(default, deserialize_with = "lenient_roster")]
    pub roster: Vec<RosterEntry>,
}
