//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::generator::MealGenerator;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Text-generation backend (None when not configured)
    pub generator: Option<Arc<dyn MealGenerator>>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create AppState without a generator; generate requests answer 503
    pub fn new(config: ApiConfig) -> Self {
        Self {
            generator: None,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Create AppState with a generator
    pub fn with_generator(config: ApiConfig, generator: Arc<dyn MealGenerator>) -> Self {
        Self {
            generator: Some(generator),
            ..Self::new(config)
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if a generator is configured
    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }
}
