//! OpenAI-compatible chat completions client

use super::LanguageModel;
use crate::config::LlmConfig;
use crate::error::{QueryNovaError, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
};
use async_openai::{Client, config::OpenAIConfig};
use async_trait::async_trait;
use std::time::Duration;

/// Chat-completions client sending the prompt as a single user message
pub struct OpenAiCompatibleModel {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl OpenAiCompatibleModel {
    /// Build a client from configuration
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            log::warn!(
                "No API key configured for {}; requests will be unauthenticated",
                config.base_url
            );
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(config.api_key.clone())
            .with_api_base(config.base_url.clone());

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("querynova/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        log::info!("Language model: {} via {}", config.model, config.base_url);

        Ok(Self {
            client: Client::with_config(openai_config).with_http_client(http_client),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiCompatibleModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                name: None,
            },
        )];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.as_str()).messages(messages);
        if let Some(max_tokens) = self.max_tokens {
            args.max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }
        let request = args.build()?;

        log::debug!("Sending {} prompt characters to {}", prompt.len(), self.model);
        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .ok_or_else(|| {
                log::error!("No content in chat response from {}", self.model);
                QueryNovaError::LanguageModel("No content in response".to_string())
            })?;

        Ok(content.trim().to_string())
    }

    fn name(&self) -> &str {
        &self.model
    }
}
