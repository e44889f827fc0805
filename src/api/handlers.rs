//! HTTP request handlers for the report API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::summary::{Trigger, render_summary};

use super::request::ReportRequest;
use super::response::{ApiError, ApiErrorResponse, LocationSummary, ReportResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/locations", get(locations_handler))
        .route("/reports", post(report_handler))
        .with_state(state)
}

/// Handler for GET /locations.
///
/// Lists the configured locations ordered by key.
async fn locations_handler(State(state): State<AppState>) -> Json<Vec<LocationSummary>> {
    Json(
        state
            .engine()
            .registry()
            .iter()
            .map(|location| LocationSummary {
                key: location.key.clone(),
                display_name: location.display_name.clone(),
            })
            .collect(),
    )
}

/// Handler for POST /reports.
///
/// Checks the location's shared secret, runs the report and returns the
/// written file path together with the rows and a summary text.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let message = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    body_text
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    format!("Invalid JSON syntax: {}", err)
                }
                JsonRejection::MissingJsonContentType(_) => {
                    "Content-Type must be application/json".to_string()
                }
                _ => "Failed to parse request body".to_string(),
            };
            let error = ApiError::malformed_json(message);
            return ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response();
        }
    };

    let engine = state.engine();
    let location = match engine
        .location(&request.location)
        .and_then(|location| location.verify_password(&request.password).map(|_| location))
    {
        Ok(location) => location.key.clone(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                location = %request.location,
                error = %err,
                "Report request rejected"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    };

    let shared = state.shared_engine();
    let task_key = location.clone();
    let result = tokio::task::spawn_blocking(move || shared.run(&task_key)).await;

    match result {
        Ok(Ok(outcome)) => {
            info!(
                correlation_id = %correlation_id,
                location = %location,
                rows = outcome.rows.len(),
                path = %outcome.path.display(),
                "Report request completed"
            );
            let summary = render_summary(&outcome, Trigger::Manual, Local::now().naive_local());
            let body = ReportResponse {
                correlation_id,
                location: outcome.location_key,
                display_name: outcome.display_name,
                file_path: outcome.path.display().to_string(),
                record_count: outcome.rows.len(),
                rows: outcome.rows,
                summary,
            };
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(body),
            )
                .into_response()
        }
        Ok(Err(err)) => {
            warn!(correlation_id = %correlation_id, location = %location, error = %err, "Report failed");
            ApiErrorResponse::from(err).into_response()
        }
        Err(join_error) => {
            error!(correlation_id = %correlation_id, error = %join_error, "Report task panicked");
            ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", "Report task failed"),
            )
            .into_response()
        }
    }
}
