//! The report engine: one synchronous extraction run per call.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::extraction::{
    ExclusionFilter, ExpiryCalculator, LocationRegistry, ReferenceTables, build_report_rows,
    extract_employee_block,
};
use crate::models::{Location, ReportRow};
use crate::workbook::{SheetSelector, read_table, write_report};

/// The result of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    /// Normalized location key.
    pub location_key: String,
    /// Display name of the location.
    pub display_name: String,
    /// Absolute path of the written report.
    pub path: PathBuf,
    /// The rows written, in report order.
    pub rows: Vec<ReportRow>,
}

/// Runs the extraction pipeline for a location.
///
/// The registry and exclusion keywords are fixed when the engine is built.
/// Each run reads its own copies of the input workbooks and overwrites the
/// location's report file.
///
/// # Example
///
/// ```no_run
/// use staff_report::config::ReportConfig;
/// use staff_report::engine::ReportEngine;
///
/// let engine = ReportEngine::new(ReportConfig::default());
/// let outcome = engine.run("kievskaya")?;
/// println!("SUCCESS:{}", outcome.path.display());
/// # Ok::<(), staff_report::error::ReportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ReportEngine {
    config: ReportConfig,
    registry: LocationRegistry,
    filter: ExclusionFilter,
}

impl ReportEngine {
    /// Creates an engine, building the registry from the configured
    /// locations.
    pub fn new(config: ReportConfig) -> Self {
        let registry = LocationRegistry::from_config(&config.locations);
        Self::with_registry(config, registry)
    }

    /// Creates an engine with an explicit registry.
    pub fn with_registry(config: ReportConfig, registry: LocationRegistry) -> Self {
        let filter = ExclusionFilter::new(&config.exclusion_keywords);
        Self {
            config,
            registry,
            filter,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Returns the location registry.
    pub fn registry(&self) -> &LocationRegistry {
        &self.registry
    }

    /// Resolves a location key.
    pub fn location(&self, key: &str) -> ReportResult<&Location> {
        self.registry.resolve(key)
    }

    /// Runs the pipeline, measuring expiry against today's local date.
    pub fn run(&self, key: &str) -> ReportResult<ReportOutcome> {
        self.run_on(key, Local::now().date_naive())
    }

    /// Runs the pipeline, measuring expiry against `today`.
    ///
    /// # Returns
    ///
    /// The written report, or the first stage error:
    /// - `UnknownLocation` for a key outside the registry
    /// - `SourceRead` for an unreadable input workbook
    /// - `LocationNotFound` / `EmptyEmployeeList` from the roster
    /// - `OutputWrite` if the report cannot be saved
    pub fn run_on(&self, key: &str, today: NaiveDate) -> ReportResult<ReportOutcome> {
        let start_time = Instant::now();
        let location = self.registry.resolve(key)?;
        let sources = &self.config.sources;

        info!(location = %location.key, display_name = %location.display_name, "Starting report");

        let roster = read_table(
            &sources.roster_path(),
            SheetSelector::Named(&sources.roster_sheet),
        )?;
        let employees = extract_employee_block(
            &roster,
            &location.display_name,
            &self.config.family_marker,
        )?;
        info!(location = %location.key, employees = employees.len(), "Employee block extracted");

        let registration = read_table(&sources.registration_path(), SheetSelector::First)?;
        let permit = read_table(&sources.permit_path(), SheetSelector::First)?;

        let calculator = ExpiryCalculator::new(today);
        let rows = build_report_rows(
            &employees,
            ReferenceTables {
                registration: &registration,
                permit: &permit,
            },
            &self.filter,
            &calculator,
        );

        let path = write_report(&self.config.output_path(&location.key), &rows)?;

        info!(
            location = %location.key,
            employees = employees.len(),
            rows = rows.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "Report completed"
        );

        Ok(ReportOutcome {
            location_key: location.key.clone(),
            display_name: location.display_name.clone(),
            path,
            rows,
        })
    }
}
