//! Meal Planner API Server
//!
//! Run with: cargo run --bin mealplanner-api
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see `mealplanner config`),
//! then overridden by environment variables:
//! - `MEALPLANNER_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `MEALPLANNER_API_PORT`: Port to listen on (default: 8000)
//! - `MEALPLANNER_GENERATOR_URL`: OpenAI-compatible API base (enables suggestions)
//! - `MEALPLANNER_GENERATOR_MODEL`: Model name (default: gpt-4o-mini)
//! - `MEALPLANNER_GENERATOR_API_KEY`: Bearer key for the generator
//! - `RUST_LOG`: Log filter (default: mealplanner=info,tower_http=debug)

use mealplanner::api::{serve, AppState};
use mealplanner::config::Config;
use mealplanner::generator::ChatCompletionsGenerator;
use mealplanner::logging::init_logging;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_logging(&config.logging, "tower_http=debug");

    tracing::info!("Starting Meal Planner API server v{}", env!("CARGO_PKG_VERSION"));

    let state = match ChatCompletionsGenerator::from_config(&config.generator)? {
        Some(generator) => {
            tracing::info!(
                "Meal generator enabled: {} ({})",
                generator.base_url(),
                config.generator.model
            );
            AppState::with_generator(config.api.clone(), Arc::new(generator))
        }
        None => {
            tracing::warn!(
                "Meal generator disabled (set MEALPLANNER_GENERATOR_URL to enable suggestions)"
            );
            AppState::new(config.api.clone())
        }
    };

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Meal Planner API server stopped");
    Ok(())
}
