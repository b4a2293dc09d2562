//! Anthropic Messages API provider
//!
//! Talks to `/v1/messages` directly with `reqwest` so image blocks reach the
//! model alongside `tool_use` and `tool_result` blocks.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::Logger;
use crate::types::{ChatMessage, ContentPart, ToolChoice};

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChatRequest, ChatResponse, Provider, ProviderModelConfig};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "str::is_empty")]
    system: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<WireToolChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct WireToolChoice {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl From<ToolChoice> for WireToolChoice {
    fn from(choice: ToolChoice) -> Self {
        let kind = match choice {
            ToolChoice::Auto => "auto",
            ToolChoice::None => "none",
            ToolChoice::Required => "any",
        };
        Self { kind }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<WireBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireBlock {
    Text { text: String },
    ToolUse { id: String, name: String, input: Value },
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Strip a leading "anthropic/" from a model id
fn model_name(model: &str) -> &str {
    model.strip_prefix("anthropic/").unwrap_or(model)
}

/// Build the JSON body for a Messages API call
pub(crate) fn build_request_body(request: &ChatRequest, model: &ProviderModelConfig) -> ProviderResult<Value> {
    let tools: Vec<WireTool<'_>> = request
        .options
        .tools
        .iter()
        .flatten()
        .map(|t| WireTool {
            name: &t.name,
            description: &t.description,
            input_schema: t
                .input_schema
                .clone()
                .unwrap_or_else(|| serde_json::json!({ "type": "object", "properties": {} })),
        })
        .collect();

    // tool_choice is only accepted alongside tools
    let tool_choice = if tools.is_empty() {
        None
    } else {
        Some(request.options.tool_choice.unwrap_or_default().into())
    };

    let body = MessagesRequest {
        model: model_name(&model.model),
        max_tokens: request.options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        system: &request.system,
        messages: &request.messages,
        tools,
        tool_choice,
        temperature: request.options.temperature,
    };
    Ok(serde_json::to_value(body)?)
}

/// Turn a successful response body into content segments
pub(crate) fn parse_response(body: &str) -> ProviderResult<ChatResponse> {
    let parsed: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::invalid_response("anthropic", e.to_string()))?;

    let content = parsed
        .content
        .into_iter()
        .filter_map(|block| match block {
            WireBlock::Text { text } => Some(ContentPart::Text { text }),
            WireBlock::ToolUse { id, name, input } => Some(ContentPart::ToolUse { id, name, input }),
            WireBlock::Unknown => None,
        })
        .collect();

    Ok(ChatResponse {
        content,
        stop_reason: parsed.stop_reason,
    })
}

/// Pull the human-readable message out of an error body, if it has one
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string())
}

/// Provider for Anthropic's Messages API
pub struct AnthropicProvider {
    client: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl AnthropicProvider {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            client: reqwest::Client::new(),
            logger,
        }
    }

    fn endpoint(&self, model: &ProviderModelConfig) -> String {
        format!("{}/v1/messages", self.get_api_base(model).trim_end_matches('/'))
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn default_api_base(&self) -> &str {
        "https://api.anthropic.com/"
    }

    async fn complete(
        &self,
        request: ChatRequest,
        model: &ProviderModelConfig,
    ) -> ProviderResult<ChatResponse> {
        let api_key = model
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::missing_api_key("anthropic"))?;

        let body = build_request_body(&request, model)?;
        self.logger.info(&format!(
            "[AnthropicProvider] POST {} model={} messages={}",
            self.endpoint(model),
            model_name(&model.model),
            request.messages.len()
        ));

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.as_u16() == 429 {
            return Err(ProviderError::rate_limited("anthropic", error_message(&text)));
        }
        if !status.is_success() {
            self.logger.error(&format!(
                "[AnthropicProvider] request failed ({}): {}",
                status, text
            ));
            return Err(ProviderError::api_error("anthropic", status.as_u16(), error_message(&text)));
        }

        let parsed = parse_response(&text)?;
        self.logger.debug(&format!(
            "[AnthropicProvider] {} segments, stop_reason={:?}",
            parsed.content.len(),
            parsed.stop_reason
        ));
        Ok(parsed)
    }
}
