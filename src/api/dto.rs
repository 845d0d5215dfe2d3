//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::Serialize;

pub use crate::suggest::{
    SuggestionRequest as GenerateMealRequest, SuggestionResponse as GenerateMealResponse,
};

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Name of the configured generator, if any
    pub generator: Option<String>,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
