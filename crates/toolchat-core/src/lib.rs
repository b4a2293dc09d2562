//! Toolchat Core
//!
//! A tool-augmented conversation loop: user turns go to a model service
//! together with a catalog of local tools; tool requests in the reply are
//! executed and their results fed back so the model can narrate them.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use toolchat_core::{Agent, NoOpLogger, ProviderModelConfig, ToolRegistry};
//! use toolchat_core::providers::create_provider;
//!
//! let logger = Arc::new(NoOpLogger);
//! let provider = create_provider("anthropic", logger.clone())?;
//! let tools = ToolRegistry::with_builtin_tools(None, logger.clone());
//! let model = ProviderModelConfig::new("claude-3-5-sonnet-20240620").with_api_key(key);
//!
//! let mut agent = Agent::new(provider.into(), tools, model, logger);
//! let reply = agent.process_turn("What files are in this folder?", None).await;
//! ```

pub mod agent;
pub mod attachment;
pub mod config;
pub mod conversation;
pub mod logging;
pub mod providers;
pub mod secrets;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use types::{
    ChatMessage, ContentPart, ImageSource, MessageContent, MessageRole, Tool, ToolCall, ToolChoice,
    ToolOutcome, ToolResult,
};

pub use agent::{Agent, TurnEvent, TurnObserver};

pub use attachment::{encode_image, EncodedImage, ImageEncodeError};

pub use conversation::Conversation;

pub use providers::{
    create_provider, supported_providers, ChatOptions, ChatRequest, ChatResponse, Provider,
    ProviderError, ProviderModelConfig, ProviderResult,
};

pub use secrets::{
    default_secret_chain, ChainSecretStore, EnvSecretStore, KeychainSecretStore, SecretStore,
};

pub use logging::{ConsoleLogger, FileLogger, Logger, NoOpLogger};

pub use config::{AgentSettings, ConfigError, ConfigFile, ConfigSource};

pub use tools::{ToolError, ToolHandler, ToolRegistry};
