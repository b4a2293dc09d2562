//! The agent and its turn loop

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::attachment::encode_image;
use crate::conversation::Conversation;
use crate::logging::Logger;
use crate::providers::{ChatOptions, ChatRequest, ChatResponse, Provider, ProviderModelConfig, ProviderResult};
use crate::tools::ToolRegistry;
use crate::types::{ChatMessage, ContentPart, MessageRole, ToolCall, ToolChoice, ToolOutcome};

use super::prompt::default_system_prompt;

/// Reply when the first model call of a turn fails
pub const SERVICE_ERROR_REPLY: &str =
    "Sorry, there was an error communicating with the model service, please try again!";

/// Reply when an attached image cannot be read or encoded
pub const IMAGE_ERROR_REPLY: &str = "Sorry, there was an error processing the image, please try again!";

/// Appended to the reply when a follow-up call after a tool run fails
pub const FOLLOW_UP_ERROR_NOTE: &str =
    "\nI encountered an error while processing the tool result, please try again!";

/// Leads the text part of a message carrying an image
pub const IMAGE_PROMPT_PREFIX: &str = "User input for image: ";

/// Output budget per model call unless configured otherwise
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Progress notifications emitted while a turn runs
#[derive(Debug, Clone, PartialEq)]
pub enum TurnEvent {
    /// The model asked for a tool
    ToolUse { name: String, input: Value },
    /// The tool finished
    ToolResult { name: String, outcome: ToolOutcome },
}

/// Callback receiving [`TurnEvent`]s
pub type TurnObserver = Arc<dyn Fn(&TurnEvent) + Send + Sync>;

/// Drives conversation turns against one model service
pub struct Agent {
    provider: Arc<dyn Provider>,
    tools: ToolRegistry,
    conversation: Conversation,
    model: ProviderModelConfig,
    options: ChatOptions,
    system_prompt: String,
    observer: Option<TurnObserver>,
    logger: Arc<dyn Logger>,
}

impl Agent {
    pub fn new(
        provider: Arc<dyn Provider>,
        tools: ToolRegistry,
        model: ProviderModelConfig,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            provider,
            tools,
            conversation: Conversation::new(),
            model,
            options: ChatOptions::new().with_max_tokens(DEFAULT_MAX_TOKENS),
            system_prompt: default_system_prompt().to_string(),
            observer: None,
            logger,
        }
    }

    /// Replace the system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Replace the per-call options template (max tokens, temperature)
    ///
    /// Tools and tool choice are filled in on every call and ignored here.
    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_observer(mut self, observer: TurnObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Run one turn and return the reply text
    ///
    /// The reply may be empty when the model answered with tool use only and
    /// the follow-up produced no text. Failures come back as fixed replies.
    pub async fn process_turn(&mut self, user_text: &str, image_path: Option<&Path>) -> String {
        let user_message = match image_path {
            Some(path) => match self.image_message(user_text, path) {
                Some(message) => message,
                None => return IMAGE_ERROR_REPLY.to_string(),
            },
            None => ChatMessage::user(user_text),
        };
        if !self.conversation.append(user_message) {
            self.logger.debug("[Agent] Empty user input not stored");
        }

        let response = match self.call_model().await {
            Ok(response) => response,
            Err(e) => {
                self.logger.error(&format!("[Agent] Model call failed: {}", e));
                return SERVICE_ERROR_REPLY.to_string();
            }
        };

        let mut reply = String::new();
        for part in &response.content {
            if let Some(text) = part.as_text() {
                reply.push_str(text);
            } else if let Some(call) = ToolCall::from_part(part) {
                self.dispatch_tool(call, &mut reply).await;
            }
        }

        if !reply.is_empty() {
            self.conversation.append(ChatMessage::assistant(reply.clone()));
        }
        debug_assert!(self.conversation.pending_tool_uses().is_empty());
        reply
    }

    /// Encode the image and build the `[Image, Text]` user message
    fn image_message(&self, user_text: &str, path: &Path) -> Option<ChatMessage> {
        self.logger.info(&format!("[Agent] Processing image at path: {}", path.display()));
        match encode_image(path) {
            Ok(image) => {
                self.logger.debug(&format!(
                    "[Agent] Image encoded: {}x{}, {} base64 bytes",
                    image.width,
                    image.height,
                    image.data.len()
                ));
                Some(ChatMessage::with_parts(
                    MessageRole::User,
                    vec![
                        ContentPart::image_base64(image.media_type, image.data),
                        ContentPart::text(format!("{}{}", IMAGE_PROMPT_PREFIX, user_text)),
                    ],
                ))
            }
            Err(e) => {
                self.logger.error(&format!("[Agent] {}", e));
                None
            }
        }
    }

    /// Run one requested tool, record the exchange and let the model narrate it
    async fn dispatch_tool(&mut self, call: ToolCall, reply: &mut String) {
        self.logger.info(&format!("[Agent] Tool used: {} input: {}", call.name, call.input));
        self.notify(TurnEvent::ToolUse {
            name: call.name.clone(),
            input: call.input.clone(),
        });

        let result = self.tools.execute_tool_call(&call).await;
        self.notify(TurnEvent::ToolResult {
            name: call.name.clone(),
            outcome: result.outcome.clone(),
        });

        self.conversation
            .append(ChatMessage::with_parts(MessageRole::Assistant, vec![call.to_part()]));
        self.conversation
            .append(ChatMessage::with_parts(MessageRole::User, vec![result.into_part()]));

        match self.call_model().await {
            Ok(follow_up) => {
                for part in &follow_up.content {
                    if let Some(text) = part.as_text() {
                        reply.push_str(text);
                    } else if part.is_tool_use() {
                        // Only one level of tool use per turn
                        self.logger.warn(&format!(
                            "[Agent] Ignoring nested tool use after {}",
                            call.name
                        ));
                    }
                }
            }
            Err(e) => {
                self.logger.error(&format!("[Agent] Follow-up call after {} failed: {}", call.name, e));
                reply.push_str(FOLLOW_UP_ERROR_NOTE);
            }
        }
    }

    async fn call_model(&self) -> ProviderResult<ChatResponse> {
        let options = self
            .options
            .clone()
            .with_tools(self.tools.get_llm_tools())
            .with_tool_choice(ToolChoice::Auto);
        let request = ChatRequest::new(self.system_prompt.clone(), self.conversation.snapshot())
            .with_options(options);

        self.logger.debug(&format!(
            "[Agent] Calling {} with {} messages",
            self.provider.name(),
            request.messages.len()
        ));
        self.provider.complete(request, &self.model).await
    }

    fn notify(&self, event: TurnEvent) {
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }
}
