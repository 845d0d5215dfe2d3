//! Meal Generation
//!
//! Backend side of the suggestion flow: turns `{diet, calories}` into a
//! prompt and asks an external text-generation endpoint for a meal.
//!
//! - [`MealGenerator`]: seam the API handlers call through
//! - [`ChatCompletionsGenerator`]: OpenAI-compatible `/chat/completions` client

mod client;

pub use client::ChatCompletionsGenerator;

use async_trait::async_trait;
use thiserror::Error;

/// Produces a meal suggestion from a diet and calorie target
#[async_trait]
pub trait MealGenerator: Send + Sync {
    /// Short name for logs and health output
    fn name(&self) -> &str;

    async fn generate(&self, diet: &str, calories: i32) -> Result<String, GeneratorError>;
}

/// System prompt sent with every request
pub const SYSTEM_PROMPT: &str =
    "You are a nutrition assistant. Suggest one meal with its main ingredients. \
     Keep the answer under 80 words.";

/// User prompt for a diet and calorie target
pub fn build_prompt(diet: &str, calories: i32) -> String {
    format!(
        "Suggest a {} meal of about {} calories.",
        diet.trim(),
        calories
    )
}

/// Errors from the text-generation endpoint
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Generator unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Endpoint answered but with no usable text
    #[error("Empty completion")]
    EmptyCompletion,
}

impl GeneratorError {
    /// Classify a transport failure
    pub fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GeneratorError::Timeout
        } else if e.is_connect() {
            GeneratorError::Unavailable
        } else {
            GeneratorError::Request(e)
        }
    }
}
