//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub suggest: SuggestConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hosted database (PostgREST) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Project URL, e.g. "https://your-project.supabase.co"
    #[serde(default = "default_store_url")]
    pub url: String,

    /// Public anon key sent as `apikey` on every request
    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_table")]
    pub table: String,
}

fn default_store_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_table() -> String {
    "meals".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            anon_key: String::new(),
            table: default_table(),
        }
    }
}

impl StoreConfig {
    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Identity provider sign-in options
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_oauth_provider")]
    pub provider: String,

    /// Where the identity provider sends the browser after sign-in
    #[serde(default = "default_redirect_to")]
    pub redirect_to: String,
}

fn default_oauth_provider() -> String {
    "google".to_string()
}

fn default_redirect_to() -> String {
    "http://localhost:3000".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: default_oauth_provider(),
            redirect_to: default_redirect_to(),
        }
    }
}

/// Suggestion requester configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestConfig {
    /// Full URL of the generate-meal endpoint
    #[serde(default = "default_suggest_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_diet")]
    pub diet: String,

    #[serde(default = "default_calories")]
    pub calories: i32,
}

fn default_suggest_endpoint() -> String {
    "http://localhost:8000/api/generate_meal".to_string()
}

fn default_diet() -> String {
    "balanced".to_string()
}

fn default_calories() -> i32 {
    600
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            endpoint: default_suggest_endpoint(),
            diet: default_diet(),
            calories: default_calories(),
        }
    }
}

/// Text-generation endpoint used by the backend
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// OpenAI-compatible API base, e.g. "https://api.openai.com/v1".
    /// The backend answers 503 on generate requests when unset.
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_generator_timeout")]
    pub request_timeout_ms: u64,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_generator_timeout() -> u64 {
    30_000
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            model: default_model(),
            api_key: None,
            request_timeout_ms: default_generator_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("mealplanner").join("config.toml")),
            Some(PathBuf::from("/etc/mealplanner/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // API overrides
        if let Some(host) = var("MEALPLANNER_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = var("MEALPLANNER_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Store overrides
        if let Some(url) = var("MEALPLANNER_STORE_URL") {
            self.store.url = url;
        }
        if let Some(key) = var("MEALPLANNER_STORE_ANON_KEY") {
            self.store.anon_key = key;
        }

        if let Some(endpoint) = var("MEALPLANNER_SUGGEST_ENDPOINT") {
            self.suggest.endpoint = endpoint;
        }

        // Generator overrides
        if let Some(url) = var("MEALPLANNER_GENERATOR_URL") {
            self.generator.base_url = Some(url);
        }
        if let Some(model) = var("MEALPLANNER_GENERATOR_MODEL") {
            self.generator.model = model;
        }
        if let Some(key) = var("MEALPLANNER_GENERATOR_API_KEY") {
            self.generator.api_key = Some(key);
        }

        // Logging overrides
        if let Some(level) = var("MEALPLANNER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("MEALPLANNER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Meal Planner Configuration
#
# Environment variables override these settings:
# - MEALPLANNER_API_HOST
# - MEALPLANNER_API_PORT
# - MEALPLANNER_STORE_URL
# - MEALPLANNER_STORE_ANON_KEY
# - MEALPLANNER_SUGGEST_ENDPOINT
# - MEALPLANNER_GENERATOR_URL
# - MEALPLANNER_GENERATOR_MODEL
# - MEALPLANNER_GENERATOR_API_KEY
# - MEALPLANNER_LOG_LEVEL
# - MEALPLANNER_LOG_FORMAT

[api]
# Backend host
host = "0.0.0.0"

# Backend port
port = 8000

# Allowed CORS origins (empty list allows any origin)
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

[store]
# Hosted database project URL
url = "https://your-project-url.supabase.co"

# Public anon key
anon_key = "your-anon-key"

# Table holding meal records
table = "meals"

[auth]
# OAuth provider used for sign-in
provider = "google"

# Where to return after sign-in
redirect_to = "http://localhost:3000"

[suggest]
# Generate-meal endpoint called by the front ends
endpoint = "http://localhost:8000/api/generate_meal"

# Fixed request payload
diet = "balanced"
calories = 600

[generator]
# OpenAI-compatible API base used by the backend
# base_url = "https://api.openai.com/v1"

model = "gpt-4o-mini"

# api_key = ""

# Request timeout in milliseconds
request_timeout_ms = 30000

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.addr(), "0.0.0.0:8000");
        assert_eq!(config.store.table, "meals");
        assert_eq!(config.suggest.diet, "balanced");
        assert_eq!(config.suggest.calories, 600);
        assert!(config.generator.base_url.is_none());
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.store.url, "https://your-project-url.supabase.co");
        assert_eq!(config.auth.provider, "google");
        assert_eq!(config.generator.request_timeout_ms, 30_000);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[store]\nurl = \"https://demo.supabase.co/\"\n").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.store.base_url(), "https://demo.supabase.co");
        assert_eq!(config.store.table, "meals");
        assert_eq!(config.api.port, 8000);
    }

    #[test]
    fn test_api_table_without_origins_keeps_default_origins() {
        let config: Config = toml::from_str("[api]\nport = 9000\n").unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.cors_origins, ApiConfig::default().cors_origins);

        let config: Config = toml::from_str("[api]\ncors_origins = []\n").unwrap();
        assert!(config.api.cors_origins.is_empty());
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nport = ").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("MEALPLANNER_API_PORT", "9001"),
            ("MEALPLANNER_STORE_ANON_KEY", "anon"),
            ("MEALPLANNER_GENERATOR_URL", "http://llm.local/v1"),
            ("MEALPLANNER_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.port, 9001);
        assert_eq!(config.store.anon_key, "anon");
        assert_eq!(config.generator.base_url.as_deref(), Some("http://llm.local/v1"));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_bad_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "MEALPLANNER_API_PORT").then(|| "nope".to_string()));
        assert_eq!(config.api.port, 8000);
    }
}
