//! # Meal Planner
//!
//! Meal Planner AI - track meals in a hosted database and ask an AI backend
//! for meal suggestions.
//!
//! ## Features
//!
//! - **Meal log**: list, add and delete meals stored in a hosted table
//! - **Sign-in**: OAuth through a hosted identity provider
//! - **Suggestions**: AI-generated meals through the backend proxy
//!
//! ## Modules
//!
//! - [`planner`]: headless view model (state, actions, session watcher, rendering)
//! - [`store`]: meal store clients
//! - [`auth`]: identity provider clients
//! - [`suggest`]: client for the generate-meal endpoint
//! - [`generator`]: backend-side text-generation client
//! - [`api`]: backend REST API with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mealplanner::auth::MemoryIdentityProvider;
//! use mealplanner::planner::{view, Planner};
//! use mealplanner::store::MemoryMealStore;
//! use mealplanner::suggest::SuggestionClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let planner = Planner::new(
//!         Arc::new(MemoryMealStore::new()),
//!         Arc::new(MemoryIdentityProvider::new()),
//!         Arc::new(SuggestionClient::new("http://localhost:8000/api/generate_meal")),
//!     );
//!
//!     // Load session and meals, keep the user in sync
//!     let watcher = planner.start().await;
//!
//!     planner.set_meal_name("Oatmeal").await;
//!     planner.set_calories("320").await;
//!     planner.add_meal().await;
//!
//!     println!("{}", view::render(&planner.snapshot().await));
//!
//!     watcher.stop().await;
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod generator;
pub mod logging;
pub mod model;
pub mod planner;
pub mod store;
pub mod suggest;

// Re-export top-level types for convenience
pub use model::{AuthEvent, Meal, MealId, NewMeal, Session, User};

pub use store::{MealStore, MemoryMealStore, RestMealStore, StoreError, StoreResult};

pub use auth::{
    AuthError, AuthResult, IdentityProvider, MemoryIdentityProvider, RestIdentityProvider,
};

pub use suggest::{
    MealSuggester, SuggestError, SuggestionClient, SuggestionRequest, SuggestionResponse,
};

pub use generator::{ChatCompletionsGenerator, GeneratorError, MealGenerator};

pub use planner::{Planner, PlannerState, SessionWatcher, Theme};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, AuthConfig, Config, ConfigError, GeneratorConfig, LoggingConfig, StoreConfig,
    SuggestConfig,
};
