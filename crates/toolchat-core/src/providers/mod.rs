//! Model service providers
//!
//! ## Architecture
//!
//! - `AnthropicProvider` speaks the Messages API directly, keeping image,
//!   tool-use and tool-result blocks intact.
//! - `GenaiProvider` covers every other provider through the `genai` crate.
//!   Providers not native to genai (Azure, OpenRouter, Mistral) go through
//!   genai's `ServiceTargetResolver` as OpenAI-compatible endpoints.
//! - `MockProvider` answers deterministically for tests and offline use.
//!
//! Auth flows through our secret chain, not genai's env var lookup.

mod anthropic;
mod error;
mod genai_adapter;
mod genai_provider;
mod mock;
mod traits;

// Core traits and types
pub use error::{ProviderError, ProviderResult};
pub use traits::{ChatOptions, ChatRequest, ChatResponse, Provider, ProviderModelConfig};

pub use anthropic::AnthropicProvider;
pub use genai_adapter::{is_genai_native, is_genai_supported};
pub use genai_provider::GenaiProvider;
pub use mock::{MockMode, MockProvider, MockReply};

use crate::logging::Logger;
use std::sync::Arc;

/// Create a provider for the given provider ID
///
/// `anthropic` gets the native Messages API client, `mock` the echo mock, and
/// anything genai can route gets a `GenaiProvider`.
pub fn create_provider(provider_id: &str, logger: Arc<dyn Logger>) -> ProviderResult<Box<dyn Provider>> {
    let id = provider_id.to_lowercase();
    match id.as_str() {
        "anthropic" => Ok(Box::new(AnthropicProvider::new(logger))),
        "mock" => Ok(Box::new(MockProvider::echo(logger))),
        _ if GenaiProvider::supports(&id) => Ok(Box::new(GenaiProvider::new(id, logger))),
        _ => Err(ProviderError::UnsupportedProvider(provider_id.to_string())),
    }
}

/// List all supported provider IDs
pub fn supported_providers() -> Vec<&'static str> {
    vec![
        "anthropic",
        // Native genai providers
        "openai",
        "gemini",
        "ollama",
        "groq",
        "xai",
        "deepseek",
        "cohere",
        "fireworks",
        "together",
        // OpenAI-compatible providers via resolver
        "azure",
        "openrouter",
        "mistral",
        // Testing
        "mock",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_create_provider() {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);

        assert_eq!(create_provider("anthropic", logger.clone()).unwrap().name(), "anthropic");
        assert_eq!(create_provider("Mock", logger.clone()).unwrap().name(), "mock");
        assert_eq!(create_provider("openai", logger.clone()).unwrap().name(), "openai");

        let err = create_provider("acme", logger).err().unwrap();
        assert!(matches!(err, ProviderError::UnsupportedProvider(ref id) if id == "acme"));
    }

    #[test]
    fn test_supported_providers_all_create() {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
        for id in supported_providers() {
            assert!(create_provider(id, logger.clone()).is_ok(), "{}", id);
        }
    }
}
