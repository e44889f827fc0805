//! Error types for the staff expiry report engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a report.

use thiserror::Error;

/// The main error type for the report engine.
///
/// Stage-level variants abort the whole run. [`ReportError::RowProcessing`]
/// is raised inside the per-employee loop and only drops that employee.
///
/// # Example
///
/// ```
/// use staff_report::error::ReportError;
///
/// let error = ReportError::UnknownLocation {
///     key: "arbat".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown location: arbat");
/// ```
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The location key is not in the registry.
    #[error("Unknown location: {key}")]
    UnknownLocation {
        /// The normalized key that was looked up.
        key: String,
    },

    /// The location marker row is absent from the staff roster.
    #[error("Location '{display_name}' not found in the staff roster")]
    LocationNotFound {
        /// The display name used as the anchor.
        display_name: String,
    },

    /// The location block contains no rows that look like employee names.
    #[error("No employees found under location '{display_name}'")]
    EmptyEmployeeList {
        /// The display name used as the anchor.
        display_name: String,
    },

    /// An input workbook is missing, corrupt or lacks the expected sheet.
    #[error("Failed to read workbook '{path}': {message}")]
    SourceRead {
        /// The workbook path.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// A single employee could not be cross-referenced.
    #[error("Failed to process employee '{employee}': {message}")]
    RowProcessing {
        /// The employee name.
        employee: String,
        /// A description of the failure.
        message: String,
    },

    /// The report could not be written.
    #[error("Failed to write report '{path}': {message}")]
    OutputWrite {
        /// The destination path.
        path: String,
        /// A description of the write failure.
        message: String,
    },

    /// A scheduled job is malformed.
    #[error("Invalid schedule for '{location}': {message}")]
    InvalidSchedule {
        /// The location key of the job.
        location: String,
        /// What is wrong with the job.
        message: String,
    },

    /// The shared secret did not match.
    #[error("Invalid password for location '{key}'")]
    Unauthorized {
        /// The location key.
        key: String,
    },
}

/// A type alias for Results that return ReportError.
pub type ReportResult<T> = Result<T, ReportError>;
