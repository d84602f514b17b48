use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::prompts::{search_tool_schema, RESOURCE_ASSISTANT_SYSTEM};
use super::{
    Advice, LlmError, ResourceAdvisor, ToolCall, EMPTY_RESPONSE_TEXT,
    MAX_TOKENS,
};

const PROVIDER: &str = "OpenAI";

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    function: WireFunction,
}

#[derive(Debug, Deserialize)]
struct WireFunction {
    name: String,
    /// JSON-encoded string, per the chat-completions wire format.
    arguments: String,
}

/// OpenAI-compatible chat-completions client that also declares the
/// `search_local_resources` function to the model.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(client: Client, api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ResourceAdvisor for OpenAiClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn label(&self) -> &'static str {
        "openai_analysis"
    }

    async fn advise(&self, user_message: &str) -> Result<Advice, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey { provider: PROVIDER })?;

        let request_body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                {"role": "system", "content": RESOURCE_ASSISTANT_SYSTEM},
                {"role": "user", "content": user_message}
            ],
            "tools": [search_tool_schema()],
            "tool_choice": "auto"
        });

        info!(model = %self.model, "Calling OpenAI chat completions");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("OpenAI API returned {}: {}", status, body);
            return Err(LlmError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                message: body,
            });
        }

        parse_response(&body)
    }
}

fn parse_response(body: &str) -> Result<Advice, LlmError> {
    let completion: ChatCompletion = serde_json::from_str(body)?;

    let Some(choice) = completion.choices.into_iter().next() else {
        return Ok(Advice {
            text: EMPTY_RESPONSE_TEXT.to_string(),
            tool_calls: Vec::new(),
        });
    };

    let tool_calls: Vec<ToolCall> = choice
        .message
        .tool_calls
        .into_iter()
        .map(|call| ToolCall {
            arguments: serde_json::from_str(&call.function.arguments)
                .unwrap_or(Value::String(call.function.arguments)),
            name: call.function.name,
        })
        .collect();

    debug!(tool_calls = tool_calls.len(), "OpenAI call succeeded");

    let text = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| EMPTY_RESPONSE_TEXT.to_string());

    Ok(Advice { text, tool_calls })
}
