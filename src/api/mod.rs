//! HTTP API module for the report engine.
//!
//! This module provides the password-gated REST endpoints that trigger a
//! report on demand and list the configured locations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ReportRequest;
pub use response::{ApiError, LocationSummary, ReportResponse};
pub use state::AppState;
