//! Health Routes
//!
//! - GET / - Banner
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{HealthResponse, RootResponse};
use crate::api::state::AppState;

/// Text returned by `GET /`
pub const BANNER: &str = "MealPlannerAI Backend Running!";

/// GET /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: BANNER.to_string(),
    })
}

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Degraded when no generator is configured, since suggestions can't be served.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let status = if state.has_generator() {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        generator: state.generator.as_ref().map(|g| g.name().to_string()),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_banner() {
        let Json(body) = root().await;
        assert_eq!(body.message, "MealPlannerAI Backend Running!");
    }

    #[tokio::test]
    async fn test_health_without_generator() {
        let state = Arc::new(AppState::new(ApiConfig::default()));
        let Json(health) = full_health(State(state)).await;
        assert_eq!(health.status, "degraded");
        assert!(health.generator.is_none());
    }
}
