//! Error types for querynova
//!
//! This module provides the error type shared by configuration loading, schema
//! introspection, the language model client and SQL execution. Pipeline-level
//! outcomes (denylist rejections, missing SQL in a response) are not errors;
//! see [`crate::api::pipeline::GenerationStatus`].

use thiserror::Error;

/// Main error type for querynova operations
#[derive(Error, Debug)]
pub enum QueryNovaError {
    /// Text processing errors (tokenizer and extractor setup)
    #[error("Text processing error: {0}")]
    TextProcessing(String),

    /// Language model call errors (network, auth, model)
    #[error("Language model error: {0}")]
    LanguageModel(String),

    /// Database/storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login gate errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for querynova operations
pub type Result<T> = std::result::Result<T, QueryNovaError>;

impl From<async_openai::error::OpenAIError> for QueryNovaError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        QueryNovaError::LanguageModel(err.to_string())
    }
}

impl From<reqwest::Error> for QueryNovaError {
    fn from(err: reqwest::Error) -> Self {
        QueryNovaError::LanguageModel(err.to_string())
    }
}

impl From<regex::Error> for QueryNovaError {
    fn from(err: regex::Error) -> Self {
        QueryNovaError::TextProcessing(err.to_string())
    }
}
