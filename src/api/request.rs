//! Request types for the KPI engine API.
//!
//! This module defines the JSON request structures for the `/kpi/calculate`
//! and `/timesheet/parse` endpoints and the query string of `/calendar/days`.

use serde::{Deserialize, Serialize};

use crate::calculation::parse_holiday_field;
use crate::models::{Grid, HolidayInput, RosterEntry, lenient_optional_roster};

/// Holidays as sent by a client.
///
/// Either a JSON array of dates and day numbers, or the free-text form
/// field (`"16, 17; 2025-12-18"` or a JSON array encoded as a string).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HolidaysField {
    /// A structured list.
    List(Vec<HolidayInput>),
    /// A free-text field.
    Text(String),
}

impl Default for HolidaysField {
    fn default() -> Self {
        HolidaysField::List(Vec::new())
    }
}

impl HolidaysField {
    /// Flattens the field into holiday inputs.
    pub fn to_inputs(&self) -> Vec<HolidayInput> {
        match self {
            HolidaysField::List(inputs) => inputs.clone(),
            HolidaysField::Text(raw) => parse_holiday_field(raw),
        }
    }
}

/// Request body for the `/kpi/calculate` endpoint.
///
/// Norms fall back to the configured defaults, and a missing day norm
/// further falls back to the working weekdays of the month. A missing
/// roster falls back to the loaded roster snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiCalculationRequest {
    /// The raw timesheet grid.
    pub grid: Grid,
    /// Reporting year.
    pub year: i32,
    /// Reporting month, 1 through 12.
    pub month: u32,
    /// Declared holidays.
    #[serde(default)]
    pub holidays: HolidaysField,
    /// Working days expected of day-schedule employees.
    #[serde(default)]
    pub day_norm: Option<i32>,
    /// Shifts expected of shift-schedule employees.
    #[serde(default)]
    pub shift_norm: Option<i32>,
    /// Roster override; malformed rows are skipped.
    #[serde(default, deserialize_with = "lenient_optional_roster")]
    pub roster: Option<Vec<RosterEntry>>,
}

/// Request body for the `/timesheet/parse` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetParseRequest {
    /// The raw timesheet grid.
    pub grid: Grid,
    /// Reporting year.
    pub year: i32,
    /// Reporting month, 1 through 12.
    pub month: u32,
    /// Declared holidays.
    #[serde(default)]
    pub holidays: HolidaysField,
}

/// Query parameters for the `/calendar/days` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarQuery {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// Holidays in the free-text form.
    #[serde(default)]
    pub holidays: Option<String>,
}
