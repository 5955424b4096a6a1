//! HTTP request handlers for the KPI engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{HolidaySet, Norms, month_calendar, working_days_in_month};
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::Period;
use crate::timesheet::{detect_and_extract, process_timesheet};

use super::request::{CalendarQuery, HolidaysField, KpiCalculationRequest, TimesheetParseRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalendarResponse, KpiReport, TimesheetParseResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/kpi/calculate", post(calculate_handler))
        .route("/timesheet/parse", post(parse_handler))
        .route("/calendar/days", get(calendar_handler))
        .with_state(state)
}

/// Handler for POST /kpi/calculate.
///
/// Parses the timesheet grid and calculates KPI payouts against the roster.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<KpiCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing KPI calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match perform_calculation(&request, state.config()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                period = %Period::new(report.year, report.month),
                layout = %report.layout,
                processed = report.summary.processed,
                failed = report.summary.failed,
                total_kpi_final = %report.summary.total_kpi_final,
                duration_us = start_time.elapsed().as_micros(),
                "KPI calculation completed successfully"
            );
            json_response(StatusCode::OK, &report)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "KPI calculation failed");
            error_response(err.into())
        }
    }
}

/// Handler for POST /timesheet/parse.
///
/// Returns the extracted attendance records without calculating payouts.
async fn parse_handler(
    State(state): State<AppState>,
    payload: Result<Json<TimesheetParseRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing timesheet parse request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(rejection, correlation_id),
    };

    let config = state.config();
    let result = resolve_period(config, request.year, request.month, &request.holidays)
        .and_then(|(period, holidays)| {
            detect_and_extract(&request.grid, period, &holidays, config.layout())
        });

    match result {
        Ok(timesheet) => {
            info!(
                correlation_id = %correlation_id,
                layout = %timesheet.layout,
                records = timesheet.records.len(),
                "Timesheet parsed"
            );
            json_response(
                StatusCode::OK,
                &TimesheetParseResponse {
                    layout: timesheet.layout,
                    records: timesheet.records,
                },
            )
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Timesheet parse failed");
            error_response(err.into())
        }
    }
}

/// Handler for GET /calendar/days.
///
/// Lists the days of a month with their classification.
async fn calendar_handler(
    State(state): State<AppState>,
    query: Result<Query<CalendarQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return error_response(ApiErrorResponse::bad_request(ApiError::validation_error(
                rejection.body_text(),
            )));
        }
    };

    let holidays = HolidaysField::Text(query.holidays.unwrap_or_default());
    match resolve_period(state.config(), query.year, query.month, &holidays) {
        Ok((period, holidays)) => json_response(
            StatusCode::OK,
            &CalendarResponse {
                year: period.year,
                month: period.month,
                days: month_calendar(period, &holidays),
                working_days: working_days_in_month(period, &holidays),
                holidays,
            },
        ),
        Err(err) => error_response(err.into()),
    }
}

/// Runs the full pipeline for a calculation request.
fn perform_calculation(
    request: &KpiCalculationRequest,
    config: &ConfigLoader,
) -> EngineResult<KpiReport> {
    let (period, holidays) =
        resolve_period(config, request.year, request.month, &request.holidays)?;

    let defaults = config.default_norms();
    let day_norm = request
        .day_norm
        .or(defaults.day_norm)
        .unwrap_or_else(|| working_days_in_month(period, &holidays) as i32);
    let shift_norm = request.shift_norm.or(defaults.shift_norm).unwrap_or(0);
    let roster = request.roster.as_deref().unwrap_or(config.roster());

    let processed = process_timesheet(
        &request.grid,
        period,
        &holidays,
        roster,
        Norms::new(day_norm, shift_norm),
        config.layout(),
    )?;

    let summary = processed.outcome.summary()?;
    Ok(KpiReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        year: period.year,
        month: period.month,
        layout: processed.layout,
        day_norm,
        shift_norm,
        results: processed.outcome.results,
        errors: processed.outcome.errors,
        summary,
    })
}

/// Validates the period and normalizes the holidays for it.
fn resolve_period(
    config: &ConfigLoader,
    year: i32,
    month: u32,
    holidays: &HolidaysField,
) -> EngineResult<(Period, HolidaySet)> {
    let period = Period::new(year, month);
    config.validate_period(period)?;
    Ok((period, HolidaySet::from_inputs(period, &holidays.to_inputs())))
}

fn json_rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, &api_error.error)
}
