//! HTTP API module for the KPI engine.
//!
//! This module provides a thin JSON API over the timesheet parser and the
//! KPI calculator.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalendarQuery, HolidaysField, KpiCalculationRequest, TimesheetParseRequest};
pub use response::{ApiError, ApiErrorResponse, CalendarResponse, KpiReport, TimesheetParseResponse};
pub use state::AppState;
