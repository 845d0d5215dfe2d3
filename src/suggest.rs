//! Suggestion Requester Client
//!
//! Posts `{diet, calories}` to the backend's generate-meal endpoint and reads
//! back the `meal_suggestion` field.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SuggestConfig;

/// Request body for `POST /api/generate_meal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub diet: String,
    pub calories: i32,
}

impl Default for SuggestionRequest {
    fn default() -> Self {
        Self {
            diet: "balanced".to_string(),
            calories: 600,
        }
    }
}

impl From<&SuggestConfig> for SuggestionRequest {
    fn from(config: &SuggestConfig) -> Self {
        Self {
            diet: config.diet.clone(),
            calories: config.calories,
        }
    }
}

/// Response body of `POST /api/generate_meal`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub meal_suggestion: String,
}

/// Anything that can produce a meal suggestion for the view
#[async_trait]
pub trait MealSuggester: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest) -> SuggestResult<String>;
}

/// HTTP client for the generate-meal endpoint
pub struct SuggestionClient {
    client: Client,
    endpoint: String,
}

impl SuggestionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MealSuggester for SuggestionClient {
    async fn suggest(&self, request: &SuggestionRequest) -> SuggestResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    SuggestError::Unavailable
                } else {
                    SuggestError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(SuggestError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: SuggestionResponse = response.json().await?;
        Ok(body.meal_suggestion)
    }
}

/// Errors from the suggestion requester
#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("Suggestion endpoint unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Result type alias for suggestion requests
pub type SuggestResult<T> = Result<T, SuggestError>;
