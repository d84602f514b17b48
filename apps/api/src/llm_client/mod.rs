/// LLM Client — the single point of entry for all chat-completion calls.
///
/// Every provider implements `ResourceAdvisor`; `AppState` carries an
/// `Arc<dyn ResourceAdvisor>` chosen at startup from `LLM_PROVIDER`.
/// Calls are made once; failures are returned to the caller untouched.
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, LlmProviderKind};

pub mod anthropic;
pub mod openai;
pub mod prompts;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

/// Used for both providers; the original demo capped answers at 2000 tokens.
pub const MAX_TOKENS: u32 = 2000;

/// Returned when the provider sends back no usable text.
pub const EMPTY_RESPONSE_TEXT: &str = "No response generated";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not configured - please add your real API key")]
    MissingApiKey { provider: &'static str },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} API error: {status} - {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Value,
}

/// What a provider returned for one intake.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Advice {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
}

/// A chat-completion backend that turns an intake message into recommendations.
#[async_trait]
pub trait ResourceAdvisor: Send + Sync {
    /// Human-readable provider name ("Claude", "OpenAI").
    fn provider(&self) -> &'static str;

    /// Tag recorded in `functions_used` when this advisor contributed.
    fn label(&self) -> &'static str;

    async fn advise(&self, user_message: &str) -> Result<Advice, LlmError>;
}

/// Builds the advisor selected by configuration.
pub fn build_advisor(config: &Config, http: Client) -> Arc<dyn ResourceAdvisor> {
    match config.llm_provider {
        LlmProviderKind::Anthropic => Arc::new(AnthropicClient::new(
            http,
            config.anthropic_api_key.clone(),
            config.anthropic_model.clone(),
        )),
        LlmProviderKind::OpenAi => Arc::new(OpenAiClient::new(
            http,
            config.openai_api_key.clone(),
            config.openai_model.clone(),
            config.openai_base_url.clone(),
        )),
    }
}
