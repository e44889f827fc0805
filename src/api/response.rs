//! Response types for the report API.
//!
//! This module defines the success and error response structures and the
//! mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ReportError;
use crate::models::ReportRow;

/// Response body of a successful `/reports` request.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    /// Correlation id of the request, also present in the logs.
    pub correlation_id: Uuid,
    /// Location key.
    pub location: String,
    /// Display name of the location.
    pub display_name: String,
    /// Absolute path of the written report.
    pub file_path: String,
    /// Number of rows in the report.
    pub record_count: usize,
    /// The report rows.
    pub rows: Vec<ReportRow>,
    /// Chat-ready summary text.
    pub summary: String,
}

/// One entry of the `/locations` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationSummary {
    /// Location key.
    pub key: String,
    /// Display name of the location.
    pub display_name: String,
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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ReportError> for ApiErrorResponse {
    fn from(error: ReportError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            ReportError::UnknownLocation { key } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "UNKNOWN_LOCATION",
                    message,
                    format!("'{}' is not a configured location key", key),
                ),
            ),
            ReportError::Unauthorized { .. } => (
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_PASSWORD", message),
            ),
            ReportError::LocationNotFound { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::with_details(
                    "LOCATION_NOT_FOUND",
                    message,
                    "The staff roster has no marker row for this location",
                ),
            ),
            ReportError::EmptyEmployeeList { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("EMPTY_EMPLOYEE_LIST", message),
            ),
            ReportError::SourceRead { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("SOURCE_READ_ERROR", message),
            ),
            ReportError::OutputWrite { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("OUTPUT_WRITE_ERROR", message),
            ),
            ReportError::ConfigNotFound { .. } | ReportError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CONFIG_ERROR", message),
            ),
            ReportError::InvalidSchedule { .. } | ReportError::RowProcessing { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", message),
            ),
        };

        ApiErrorResponse { status, error }
    }
}
