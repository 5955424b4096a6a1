//! Configuration loading and management for the KPI engine.
//!
//! This module loads the layout markers, accepted year range and fallback
//! norms from `engine.yaml`, and the read-only roster snapshot from
//! `roster.yaml`.
//!
//! # Example
//!
//! ```no_run
//! use kpi_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded {} roster entries", config.roster().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DefaultNorms, EngineConfig, LayoutConfig, PeriodBounds, RosterFile};
