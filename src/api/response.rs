//! Response types for the KPI engine API.
//!
//! This module defines the success payloads, the error response structure,
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{CalendarDay, HolidaySet};
use crate::error::EngineError;
use crate::models::{AttendanceRecord, KpiError, KpiResult, KpiSummary};
use crate::timesheet::LayoutKind;

/// The full report of a KPI calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpiReport {
    /// Unique identifier of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Engine version that produced the report.
    pub engine_version: String,
    /// Reporting year.
    pub year: i32,
    /// Reporting month.
    pub month: u32,
    /// The detected timesheet layout.
    pub layout: LayoutKind,
    /// The day norm the calculation used.
    pub day_norm: i32,
    /// The shift norm the calculation used.
    pub shift_norm: i32,
    /// Successful payouts, in timesheet order.
    pub results: Vec<KpiResult>,
    /// Per-employee failures, in timesheet order.
    pub errors: Vec<KpiError>,
    /// Aggregate counts.
    pub summary: KpiSummary,
}

/// Response body of the `/timesheet/parse` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimesheetParseResponse {
    /// The detected timesheet layout.
    pub layout: LayoutKind,
    /// One record per employee row.
    pub records: Vec<AttendanceRecord>,
}

/// Response body of the `/calendar/days` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// The declared holidays that fall in this month.
    pub holidays: HolidaySet,
    /// Every day of the month.
    pub days: Vec<CalendarDay>,
    /// Ordinary weekdays, a suggested day norm.
    pub working_days: u32,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::UnrecognizedLayout { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "UNRECOGNIZED_LAYOUT",
                    message,
                    "The grid matches none of the supported timesheet layouts",
                ),
            ),
            EngineError::MissingDayRow { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "MISSING_DAY_ROW",
                    message,
                    "The row below the name header must hold day numbers",
                ),
            ),
            EngineError::InvalidPeriod { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("INVALID_PERIOD", message))
            }
            EngineError::InvalidNorms { .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_NORMS",
                    message,
                    "Provide a positive day_norm or shift_norm",
                ),
            ),
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
