//! Mock provider for testing
//!
//! Deterministic responses without network access. Every request is recorded
//! so tests can assert on exactly what the model would have been sent.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use super::error::{ProviderError, ProviderResult};
use super::traits::{ChatRequest, ChatResponse, Provider, ProviderModelConfig};
use crate::logging::Logger;
use crate::types::{ContentPart, MessageRole};

/// One scripted answer
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Respond with these segments
    Content(Vec<ContentPart>),
    /// Fail the call with this message
    Error(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Content(vec![ContentPart::text(text)])
    }

    pub fn parts(parts: Vec<ContentPart>) -> Self {
        MockReply::Content(parts)
    }

    pub fn error(message: impl Into<String>) -> Self {
        MockReply::Error(message.into())
    }
}

/// Mock response mode
#[derive(Debug, Clone, Default)]
pub enum MockMode {
    /// Echo back the last user text
    #[default]
    Echo,
    /// Return a fixed response
    Fixed(String),
    /// Pop replies from the script, in order
    Scripted,
    /// Fail every call
    Error(String),
}

/// Mock model service
pub struct MockProvider {
    mode: MockMode,
    script: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ChatRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockProvider {
    fn with_mode(mode: MockMode, script: Vec<MockReply>, logger: Arc<dyn Logger>) -> Self {
        Self {
            mode,
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Create an echo provider
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self::echo(logger)
    }

    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Echo, Vec::new(), logger)
    }

    pub fn fixed(response: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Fixed(response.into()), Vec::new(), logger)
    }

    /// Answer each call with the next scripted reply; an exhausted script errors
    pub fn scripted(replies: Vec<MockReply>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Scripted, replies, logger)
    }

    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Error(message.into()), Vec::new(), logger)
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Text of the last user message carrying any text
    fn last_user_text(request: &ChatRequest) -> String {
        request
            .messages
            .iter()
            .rev()
            .filter(|m| m.role == MessageRole::User)
            .map(|m| m.text_content())
            .find(|t| !t.is_empty())
            .unwrap_or_else(|| "Hello from MockProvider!".to_string())
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn default_api_base(&self) -> &str {
        "http://localhost:0/mock"
    }

    async fn complete(
        &self,
        request: ChatRequest,
        _model: &ProviderModelConfig,
    ) -> ProviderResult<ChatResponse> {
        self.logger.debug(&format!(
            "MockProvider: complete called with {} messages",
            request.messages.len()
        ));

        let reply = match &self.mode {
            MockMode::Echo => MockReply::text(format!("Echo: {}", Self::last_user_text(&request))),
            MockMode::Fixed(response) => MockReply::text(response.clone()),
            MockMode::Error(message) => MockReply::Error(message.clone()),
            MockMode::Scripted => self
                .script
                .lock()
                .pop_front()
                .unwrap_or_else(|| MockReply::error("script exhausted")),
        };

        self.requests.lock().push(request);

        match reply {
            MockReply::Content(parts) => Ok(ChatResponse::new(parts)),
            MockReply::Error(message) => {
                self.logger.debug(&format!("MockProvider: failing with {}", message));
                Err(ProviderError::Other(format!("Mock error: {}", message)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::types::ChatMessage;
    use serde_json::json;

    fn test_logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn test_request(content: &str) -> ChatRequest {
        ChatRequest::new("", vec![ChatMessage::user(content)])
    }

    fn test_config() -> ProviderModelConfig {
        ProviderModelConfig::new("mock-echo")
    }

    #[tokio::test]
    async fn test_echo_mode() {
        let provider = MockProvider::echo(test_logger());
        let response = provider
            .complete(test_request("Hello, world!"), &test_config())
            .await
            .unwrap();

        assert_eq!(response.text(), "Echo: Hello, world!");
    }

    #[tokio::test]
    async fn test_fixed_mode() {
        let provider = MockProvider::fixed("This is a test response.", test_logger());
        let response = provider
            .complete(test_request("Anything"), &test_config())
            .await
            .unwrap();

        assert_eq!(response.content, vec![ContentPart::text("This is a test response.")]);
    }

    #[tokio::test]
    async fn test_error_mode() {
        let provider = MockProvider::error("Test error message", test_logger());
        let err = provider
            .complete(test_request("Anything"), &test_config())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Mock error: Test error message");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_mode_in_order() {
        let provider = MockProvider::scripted(
            vec![
                MockReply::parts(vec![ContentPart::tool_use(
                    "toolu_1",
                    "list_files",
                    json!({ "path": "." }),
                )]),
                MockReply::text("Done."),
            ],
            test_logger(),
        );

        let first = provider.complete(test_request("one"), &test_config()).await.unwrap();
        assert!(first.content[0].is_tool_use());

        let second = provider.complete(test_request("two"), &test_config()).await.unwrap();
        assert_eq!(second.text(), "Done.");

        assert!(provider.complete(test_request("three"), &test_config()).await.is_err());
    }

    #[tokio::test]
    async fn test_records_requests() {
        let provider = MockProvider::echo(test_logger());
        provider.complete(test_request("first"), &test_config()).await.unwrap();
        provider.complete(test_request("second"), &test_config()).await.unwrap();

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].messages[0].text_content(), "second");
    }

    #[test]
    fn test_provider_name() {
        let provider = MockProvider::new(test_logger());
        assert_eq!(provider.name(), "mock");
        assert_eq!(provider.get_api_base(&test_config()), "http://localhost:0/mock");
    }
}
