//! Attendance timesheet parsing and KPI payout engine.
//!
//! This crate reads monthly attendance timesheets in the supported
//! spreadsheet layouts, classifies every day cell against the calendar and
//! declared holidays, and calculates each employee's KPI payout from their
//! attendance under a day or shift schedule.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod timesheet;
