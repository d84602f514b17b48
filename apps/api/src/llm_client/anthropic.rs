use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::prompts::RESOURCE_ASSISTANT_SYSTEM;
use super::{Advice, LlmError, ResourceAdvisor, EMPTY_RESPONSE_TEXT, MAX_TOKENS};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const PROVIDER: &str = "Claude";

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Anthropic Messages API client.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl AnthropicClient {
    pub fn new(client: Client, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ResourceAdvisor for AnthropicClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn label(&self) -> &'static str {
        "claude_analysis"
    }

    async fn advise(&self, user_message: &str) -> Result<Advice, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey { provider: PROVIDER })?;

        let request_body = AnthropicRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: RESOURCE_ASSISTANT_SYSTEM,
            messages: vec![AnthropicMessage {
                role: "user",
                content: user_message,
            }],
        };

        info!(model = %self.model, "Calling Claude API");

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Claude API returned {}: {}", status, body);
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
    let response: AnthropicResponse = serde_json::from_str(body)?;

    if let Some(usage) = &response.usage {
        debug!(
            "Claude call succeeded: input_tokens={}, output_tokens={}",
            usage.input_tokens, usage.output_tokens
        );
    }

    let text = response
        .content
        .iter()
        .find(|b| b.block_type == "text")
        .and_then(|b| b.text.clone())
        .unwrap_or_else(|| EMPTY_RESPONSE_TEXT.to_string());

    Ok(Advice {
        text,
        tool_calls: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_takes_first_text_block() {
        let body = r#"{
            "content": [
                {"type": "tool_use", "id": "t1", "name": "x", "input": {}},
                {"type": "text", "text": "FOOD ASSISTANCE: visit a pantry"},
                {"type": "text", "text": "second"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 20}
        }"#;
        let advice = parse_response(body).unwrap();
        assert_eq!(advice.text, "FOOD ASSISTANCE: visit a pantry");
        assert!(advice.tool_calls.is_empty());
    }

    #[test]
    fn test_parse_response_without_text_block() {
        let advice = parse_response(r#"{"content": []}"#).unwrap();
        assert_eq!(advice.text, EMPTY_RESPONSE_TEXT);
    }

    #[test]
    fn test_parse_response_malformed() {
        assert!(matches!(
            parse_response("<html>bad gateway</html>"),
            Err(LlmError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let client = AnthropicClient::new(Client::new(), None, "claude-sonnet-4-5".into());
        let err = client.advise("hello").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Claude API key not configured - please add your real API key"
        );
    }
}
