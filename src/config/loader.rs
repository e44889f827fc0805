//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the report
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ReportError, ReportResult};

use super::types::ReportConfig;

/// Loads and provides access to the report configuration.
///
/// # Example
///
/// ```no_run
/// use staff_report::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/report.yaml").unwrap();
/// println!("Locations: {}", loader.config().locations.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ReportConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - The file defines no locations
    pub fn load<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ReportError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: ReportConfig =
            serde_yaml::from_str(&content).map_err(|e| ReportError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        if config.locations.is_empty() {
            return Err(ReportError::ConfigParseError {
                path: path_str,
                message: "no locations configured".to_string(),
            });
        }

        Ok(Self { config })
    }

    /// Loads configuration from the file if it exists, otherwise falls back
    /// to the built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> ReportResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(path = %path.display(), "Configuration file absent, using defaults");
            Ok(Self::default())
        }
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ReportConfig {
        self.config
    }
}
