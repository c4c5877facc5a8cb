//! Language model access
//!
//! The pipeline only needs "prompt in, text out". [`LanguageModel`] is that
//! seam; [`OpenAiCompatibleModel`] implements it for any endpoint speaking the
//! OpenAI chat-completions protocol (Groq by default, Ollama, OpenAI, ...).

pub mod openai;

pub use openai::OpenAiCompatibleModel;

use crate::error::Result;
use async_trait::async_trait;

/// Text completion backend
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Complete a prompt. One request, one response, no streaming.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Human-readable model name, for logs and the chat banner
    fn name(&self) -> &str;
}
