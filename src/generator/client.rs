//! Chat Completions Client
//!
//! HTTP client for an OpenAI-compatible text-generation API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{build_prompt, GeneratorError, MealGenerator, SYSTEM_PROMPT};
use crate::config::GeneratorConfig;

/// Generator backed by `POST {base_url}/chat/completions`
pub struct ChatCompletionsGenerator {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionsGenerator {
    /// Build a generator from config. Returns `None` when no endpoint is set.
    pub fn from_config(config: &GeneratorConfig) -> Result<Option<Self>, GeneratorError> {
        let Some(base_url) = config.base_url.as_deref() else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Some(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        }))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request_body(&self, diet: &str, calories: i32) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(diet, calories),
                },
            ],
        }
    }
}

#[async_trait]
impl MealGenerator for ChatCompletionsGenerator {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, diet: &str, calories: i32) -> Result<String, GeneratorError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut request = self.client.post(&url).json(&self.request_body(diet, calories));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(GeneratorError::from_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        let completion: ChatResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(GeneratorError::EmptyCompletion)?;

        tracing::debug!(model = %self.model, chars = text.len(), "Generated meal suggestion");
        Ok(text)
    }
}

// ============================================
// Request/Response DTOs
// ============================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_base_url() {
        let generator = ChatCompletionsGenerator::from_config(&GeneratorConfig::default()).unwrap();
        assert!(generator.is_none());
    }

    #[test]
    fn test_request_body() {
        let config = GeneratorConfig {
            base_url: Some("http://llm.local/v1/".to_string()),
            ..Default::default()
        };
        let generator = ChatCompletionsGenerator::from_config(&config).unwrap().unwrap();
        assert_eq!(generator.base_url(), "http://llm.local/v1");

        let body = serde_json::to_value(generator.request_body("vegan", 500)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(
            body["messages"][1]["content"],
            "Suggest a vegan meal of about 500 calories."
        );
    }

    #[test]
    fn test_parse_completion() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"id": "x", "choices": [{"index": 0, "message": {"role": "assistant", "content": "Lentil soup"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices[0].message.content, "Lentil soup");
    }
}
