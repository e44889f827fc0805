//! Request types for the report API.

use serde::{Deserialize, Serialize};

/// Request body for the `/reports` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Location key (e.g. "kievskaya").
    pub location: String,
    /// Shared secret of the location.
    pub password: String,
}
