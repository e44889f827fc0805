//! Application state for the report API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::ReportEngine;

/// Shared application state.
///
/// Holds the report engine, whose configuration and registry are fixed at
/// startup.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ReportEngine>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: ReportEngine) -> Self {
        Self::from_shared(Arc::new(engine))
    }

    /// Creates a new application state sharing an engine with other tasks.
    pub fn from_shared(engine: Arc<ReportEngine>) -> Self {
        Self { engine }
    }

    /// Returns a reference to the engine.
    pub fn engine(&self) -> &ReportEngine {
        &self.engine
    }

    /// Returns a shared handle to the engine.
    pub fn shared_engine(&self) -> Arc<ReportEngine> {
        Arc::clone(&self.engine)
    }
}
