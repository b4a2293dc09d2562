//! GenaiProvider - provider for everything routed through the genai crate
//!
//! Handles the genai-native providers (OpenAI, Gemini, Ollama, ...) as well as
//! OpenAI-compatible ones (Azure, OpenRouter, Mistral) via the
//! ServiceTargetResolver. The response stream is collected into a single
//! `ChatResponse`.

use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;

use genai::chat::{ChatRequest as GenaiRequest, ChatStreamEvent};

use crate::logging::Logger;
use crate::types::ContentPart;

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, from_genai_tool_call, has_images, is_genai_supported, to_genai_messages,
    to_genai_options, to_genai_tools,
};
use super::traits::{ChatRequest, ChatResponse, Provider, ProviderModelConfig};

/// Provider backed by genai
pub struct GenaiProvider {
    /// Provider identifier
    provider_id: String,
    logger: Arc<dyn Logger>,
}

impl GenaiProvider {
    pub fn new(provider_id: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            provider_id: provider_id.into(),
            logger,
        }
    }

    /// Check if this provider can handle the given provider ID
    pub fn supports(provider_id: &str) -> bool {
        is_genai_supported(provider_id)
    }

    /// Extract model name from a model string (e.g., "openai/gpt-4o" -> "gpt-4o")
    pub fn extract_model_name(model: &str) -> &str {
        model.split_once('/').map(|(_, name)| name).unwrap_or(model)
    }

    fn api_error(&self, message: impl Into<String>) -> ProviderError {
        ProviderError::api_error(self.provider_id.clone(), 500, message)
    }
}

#[async_trait]
impl Provider for GenaiProvider {
    fn name(&self) -> &str {
        &self.provider_id
    }

    fn default_api_base(&self) -> &str {
        match self.provider_id.as_str() {
            "openai" => "https://api.openai.com/v1/",
            "anthropic" => "https://api.anthropic.com/",
            "gemini" => "https://generativelanguage.googleapis.com/",
            "ollama" => "http://localhost:11434/",
            "groq" => "https://api.groq.com/openai/v1/",
            "xai" => "https://api.x.ai/v1/",
            "deepseek" => "https://api.deepseek.com/",
            "cohere" => "https://api.cohere.ai/",
            "fireworks" => "https://api.fireworks.ai/inference/v1/",
            "together" => "https://api.together.xyz/v1/",
            "openrouter" => "https://openrouter.ai/api/v1/",
            "mistral" => "https://api.mistral.ai/v1/",
            "azure" => "https://your-resource.openai.azure.com/",
            _ => "https://api.openai.com/v1/",
        }
    }

    async fn complete(
        &self,
        request: ChatRequest,
        model: &ProviderModelConfig,
    ) -> ProviderResult<ChatResponse> {
        self.logger.info(&format!(
            "[GenaiProvider] complete: provider={}, model={}, messages={}",
            self.provider_id,
            model.model,
            request.messages.len()
        ));

        if has_images(&request.messages) {
            self.logger.warn(&format!(
                "[GenaiProvider] image parts are not forwarded to {}; sending text only",
                self.provider_id
            ));
        }

        let client = create_client(&self.provider_id, model);
        let genai_options = to_genai_options(&request.options);

        let mut chat_req = GenaiRequest::new(to_genai_messages(&request.system, request.messages));
        if let Some(tools) = request.options.tools {
            if !tools.is_empty() {
                chat_req = chat_req.with_tools(to_genai_tools(tools));
            }
        }

        let model_name = Self::extract_model_name(&model.model);
        let chat_stream = client
            .exec_chat_stream(model_name, chat_req, Some(&genai_options))
            .await
            .map_err(|e| self.api_error(e.to_string()))?;

        let mut stream = Box::pin(chat_stream.stream);
        let mut text = String::new();
        let mut content = Vec::new();

        while let Some(event) = stream.next().await {
            let event = event.map_err(|e| {
                self.logger.error(&format!("[GenaiProvider] Stream error: {}", e));
                self.api_error(e.to_string())
            })?;

            match event {
                ChatStreamEvent::Chunk(chunk) => text.push_str(&chunk.content),
                ChatStreamEvent::End(end) => {
                    if let Some(calls) = end.captured_tool_calls() {
                        for call in calls {
                            let call = from_genai_tool_call(call);
                            content.push(ContentPart::ToolUse {
                                id: call.id,
                                name: call.name,
                                input: call.input,
                            });
                        }
                    }
                }
                _ => {}
            }
        }

        // Text first, then the tool calls it led up to
        if !text.is_empty() {
            content.insert(0, ContentPart::Text { text });
        }

        self.logger.debug(&format!(
            "[GenaiProvider] collected {} segments",
            content.len()
        ));
        Ok(ChatResponse::new(content))
    }
}
