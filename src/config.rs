//! Configuration for querynova
//!
//! Settings come from three layers, later layers winning: built-in defaults,
//! an optional JSON file, and environment variables (a `.env` file is read by
//! the binary before this module sees the environment).

use crate::error::{QueryNovaError, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default OpenAI-compatible endpoint (Groq)
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Phrase fragments that mark a question as general trivia rather than a
/// database question.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "who is",
    "what is",
    "where is",
    "capital of",
    "define",
    "tell me about",
    "prime minister",
    "president",
    "country",
    "world record",
];

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub auth: AuthConfig,
    pub pipeline: PipelineConfig,
    pub display: DisplayConfig,
    /// Log level (`error` to `trace`) when `RUST_LOG` is unset
    pub log_level: String,
}

/// SQLite database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "querynova.db".to_string(),
        }
    }
}

/// Language model endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    /// Whole-request timeout. `None` waits for as long as the endpoint takes.
    pub request_timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: None,
            temperature: None,
            request_timeout_secs: None,
        }
    }
}

/// Login gate credentials. The gate is active only when both are set.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthConfig {
    pub fn is_enabled(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// Query pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub denylist: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Result display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows printed before the table is cut off
    pub max_rows: usize,
    /// Characters per cell before truncation
    pub max_cell_width: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_rows: 50,
            max_cell_width: 40,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file; missing sections keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            QueryNovaError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup (the environment in production)
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup("GROQ_API_KEY") {
            self.llm.api_key = key;
        }
        if let Some(path) = lookup("QUERYNOVA_DATABASE") {
            self.database.path = path;
        }
        if let Some(model) = lookup("QUERYNOVA_MODEL") {
            self.llm.model = model;
        }
        if let Some(url) = lookup("QUERYNOVA_BASE_URL") {
            self.llm.base_url = url;
        }
        if let Some(username) = lookup("QUERYNOVA_USERNAME") {
            self.auth.username = Some(username);
        }
        if let Some(password) = lookup("QUERYNOVA_PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(level) = lookup("QUERYNOVA_LOG") {
            self.log_level = level;
        }
    }

    /// Reject values the rest of the system cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(QueryNovaError::Config(
                "database.path must not be empty".to_string(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(QueryNovaError::Config(
                "llm.model must not be empty".to_string(),
            ));
        }
        if self.llm.base_url.trim().is_empty() {
            return Err(QueryNovaError::Config(
                "llm.base_url must not be empty".to_string(),
            ));
        }
        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(QueryNovaError::Config(format!(
                    "llm.temperature must be within 0.0..=2.0, got {}",
                    temperature
                )));
            }
        }
        if self.auth.username.is_some() != self.auth.password.is_some() {
            return Err(QueryNovaError::Config(
                "auth.username and auth.password must be set together".to_string(),
            ));
        }
        if self.pipeline.denylist.iter().any(|f| f.trim().is_empty()) {
            return Err(QueryNovaError::Config(
                "pipeline.denylist must not contain blank phrases".to_string(),
            ));
        }
        let level = self.log_level.trim();
        if !level.is_empty() && level.parse::<LevelFilter>().is_err() {
            return Err(QueryNovaError::Config(format!(
                "log_level must be one of off, error, warn, info, debug, trace; got '{}'",
                self.log_level
            )));
        }
        if self.display.max_cell_width < 4 {
            return Err(QueryNovaError::Config(
                "display.max_cell_width must be at least 4".to_string(),
            ));
        }
        Ok(())
    }

    /// Maximum log level when `RUST_LOG` is unset; `warn` unless configured
    pub fn log_level_filter(&self) -> LevelFilter {
        self.log_level.trim().parse().unwrap_or(LevelFilter::Warn)
    }
}
