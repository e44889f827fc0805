//! Configuration loading and management for the report engine.
//!
//! This module loads the location registry, exclusion keywords, input and
//! output locations, and weekly schedule from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use staff_report::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/report.yaml").unwrap();
//! println!("Output directory: {}", config.config().output_dir.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{LocationConfig, ReportConfig, ScheduleConfig, ScheduledJob, SourceFiles};
