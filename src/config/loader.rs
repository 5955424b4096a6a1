//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration and the roster snapshot from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{Period, RosterEntry};

use super::types::{DefaultNorms, EngineConfig, LayoutConfig, PeriodBounds, RosterFile};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml   # Layout markers, year bounds, fallback norms
/// └── roster.yaml   # Read-only roster snapshot
/// ```
///
/// # Example
///
/// ```no_run
/// use kpi_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Roster entries: {}", loader.roster().len());
/// println!("Name header: {}", loader.layout().name_header);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    engine: EngineConfig,
    roster: Vec<RosterEntry>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Either file is missing
    /// - Either file contains invalid YAML
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kpi_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), kpi_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineConfig>(&path.join("engine.yaml"))?;
        let roster = Self::load_yaml::<RosterFile>(&path.join("roster.yaml"))?.roster;

        info!(
            config_dir = %path.display(),
            roster_entries = roster.len(),
            "Configuration loaded"
        );

        Ok(Self { engine, roster })
    }

    /// Builds a loader from already-parsed parts.
    pub fn from_parts(engine: EngineConfig, roster: Vec<RosterEntry>) -> Self {
        Self { engine, roster }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        // An empty file parses as YAML null rather than an empty mapping
        if content.trim().is_empty() {
            return serde_yaml::from_str("{}").map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            });
        }

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the layout markers.
    pub fn layout(&self) -> &LayoutConfig {
        &self.engine.layout
    }

    /// Returns the accepted year range.
    pub fn period_bounds(&self) -> PeriodBounds {
        self.engine.period
    }

    /// Returns the fallback norms.
    pub fn default_norms(&self) -> DefaultNorms {
        self.engine.norms
    }

    /// Returns the roster snapshot.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }

    /// Validates a period against the configured year range.
    ///
    /// # Example
    ///
    /// ```
    /// use kpi_engine::config::ConfigLoader;
    /// use kpi_engine::models::Period;
    ///
    /// let loader = ConfigLoader::default();
    /// assert!(loader.validate_period(Period::new(2025, 12)).is_ok());
    /// assert!(loader.validate_period(Period::new(2101, 1)).is_err());
    /// ```
    pub fn validate_period(&self, period: Period) -> EngineResult<()> {
        let bounds = self.period_bounds();
        period.validate(bounds.min_year, bounds.max_year)
    }
}
