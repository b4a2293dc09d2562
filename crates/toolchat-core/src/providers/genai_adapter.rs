//! Adapter between toolchat types and genai types
//!
//! Tool uses map to genai tool calls and tool results to tool responses, so
//! the call id pairing survives the trip. Image parts are dropped.
//!
//! Auth flows through our secret chain when no explicit key is configured.

use std::future::Future;
use std::pin::Pin;

use genai::chat::{
    ChatMessage as GenaiMessage, ChatOptions as GenaiOptions, ChatRole as GenaiRole,
    ContentPart as GenaiPart, MessageContent as GenaiContent, Tool as GenaiTool,
    ToolCall as GenaiToolCall, ToolResponse as GenaiToolResponse,
};
use genai::resolver::{AuthData, AuthResolver, Endpoint, ServiceTargetResolver};
use genai::{adapter::AdapterKind, Client, ModelIden, ServiceTarget};

use crate::secrets::{default_secret_chain, SecretStore};
use crate::types::{ChatMessage, ContentPart, MessageContent, MessageRole, Tool, ToolCall};

use super::traits::{ChatOptions, ProviderModelConfig};

// ============================================================================
// Message Conversion: toolchat -> genai
// ============================================================================

/// Convert a ChatMessage to genai messages
///
/// Tool results become `Tool`-role messages carrying the originating call id,
/// and tool uses stay structured as genai tool calls on the assistant message.
/// Image parts are dropped.
pub fn to_genai_message(msg: ChatMessage) -> Vec<GenaiMessage> {
    let parts = match msg.content {
        MessageContent::Text(text) => {
            return vec![plain_message(msg.role, GenaiContent::from(text))];
        }
        MessageContent::Parts(parts) => parts,
    };

    let mut content = Vec::new();
    let mut responses = Vec::new();
    for part in parts {
        match part {
            ContentPart::Text { text } => content.push(GenaiPart::Text(text)),
            ContentPart::ToolUse { id, name, input } => content.push(GenaiPart::ToolCall(GenaiToolCall {
                call_id: id,
                fn_name: name,
                fn_arguments: input,
                thought_signatures: None,
            })),
            ContentPart::ToolResult { tool_use_id, content: output } => {
                responses.push(GenaiToolResponse::new(tool_use_id, output))
            }
            ContentPart::Image { .. } => {}
        }
    }

    // Responses must directly follow the assistant message that made the calls
    let mut out: Vec<GenaiMessage> = responses.into_iter().map(GenaiMessage::from).collect();
    if !content.is_empty() {
        out.push(plain_message(msg.role, GenaiContent::from_parts(content)));
    }
    out
}

fn plain_message(role: MessageRole, content: GenaiContent) -> GenaiMessage {
    match role {
        MessageRole::User => GenaiMessage::user(content),
        MessageRole::Assistant => GenaiMessage::assistant(content),
    }
}

/// Convert the system prompt and history to genai messages
pub fn to_genai_messages(system: &str, messages: Vec<ChatMessage>) -> Vec<GenaiMessage> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    if !system.is_empty() {
        out.push(GenaiMessage::system(GenaiContent::from(system.to_string())));
    }
    out.extend(messages.into_iter().flat_map(to_genai_message));
    out
}

/// True when any message carries an image part
pub fn has_images(messages: &[ChatMessage]) -> bool {
    messages
        .iter()
        .flat_map(|m| m.parts())
        .any(|p| matches!(p, ContentPart::Image { .. }))
}

// ============================================================================
// Tool / Options Conversion: toolchat -> genai
// ============================================================================

/// Convert a Tool descriptor to genai Tool
pub fn to_genai_tool(tool: Tool) -> GenaiTool {
    let mut genai_tool = GenaiTool::new(&tool.name).with_description(&tool.description);

    if let Some(schema) = tool.input_schema {
        genai_tool = genai_tool.with_schema(schema);
    }

    genai_tool
}

pub fn to_genai_tools(tools: Vec<Tool>) -> Vec<GenaiTool> {
    tools.into_iter().map(to_genai_tool).collect()
}

/// Convert ChatOptions to genai ChatOptions
pub fn to_genai_options(options: &ChatOptions) -> GenaiOptions {
    let mut genai_opts = GenaiOptions::default();

    if let Some(temp) = options.temperature {
        genai_opts = genai_opts.with_temperature(temp as f64);
    }

    if let Some(max_tokens) = options.max_tokens {
        genai_opts = genai_opts.with_max_tokens(max_tokens);
    }

    // Tool calls arrive on the End event only when captured
    genai_opts = genai_opts.with_capture_tool_calls(true);

    genai_opts
}

// ============================================================================
// Response Conversion: genai -> toolchat
// ============================================================================

/// Convert genai ToolCall to ToolCall
pub fn from_genai_tool_call(tc: &GenaiToolCall) -> ToolCall {
    ToolCall {
        id: tc.call_id.clone(),
        name: tc.fn_name.clone(),
        input: tc.fn_arguments.clone(),
    }
}

// ============================================================================
// Client Creation
// ============================================================================

/// Map a provider ID to the secret key name used for lookup
pub fn provider_to_secret_key(provider: &str) -> String {
    match provider.to_lowercase().as_str() {
        "gemini" | "google" => "gemini".to_string(),
        "azure" => "azure".to_string(),
        other => other.to_string(),
    }
}

/// Map a genai AdapterKind to the secret key name used for lookup
pub fn adapter_kind_to_secret_key(adapter: AdapterKind) -> String {
    match adapter {
        AdapterKind::OpenAI => "openai".to_string(),
        AdapterKind::Anthropic => "anthropic".to_string(),
        AdapterKind::Gemini => "gemini".to_string(),
        AdapterKind::Groq => "groq".to_string(),
        AdapterKind::DeepSeek => "deepseek".to_string(),
        _ => format!("{:?}", adapter).to_lowercase(),
    }
}

/// Create a genai Client with our auth and endpoint resolution
pub fn create_client(provider: &str, model: &ProviderModelConfig) -> Client {
    let auth_provider = provider.to_string();
    let auth_explicit_key = model.api_key.clone();

    let auth_resolver = AuthResolver::from_resolver_async_fn(
        move |model_iden: ModelIden| -> Pin<Box<dyn Future<Output = genai::resolver::Result<Option<AuthData>>> + Send>> {
            let provider = auth_provider.clone();
            let explicit_key = auth_explicit_key.clone();
            let adapter_kind = model_iden.adapter_kind;

            Box::pin(async move {
                if let Some(key) = explicit_key {
                    return Ok(Some(AuthData::from_single(key)));
                }

                let secret_key = if provider.is_empty() {
                    adapter_kind_to_secret_key(adapter_kind)
                } else {
                    provider_to_secret_key(&provider)
                };

                // None lets genai handle keyless providers such as Ollama
                Ok(default_secret_chain().get(&secret_key).map(AuthData::from_single))
            })
        },
    );

    let target_provider = provider.to_string();
    let target_api_base = model.api_base.clone();

    let target_resolver = ServiceTargetResolver::from_resolver_fn(
        move |target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
            let ServiceTarget { ref model, .. } = target;

            let endpoint = match (target_provider.as_str(), target_api_base.as_ref()) {
                (_, Some(base)) => Endpoint::from_owned(base.clone()),
                ("openrouter", None) => Endpoint::from_static("https://openrouter.ai/api/v1/"),
                ("mistral", None) => Endpoint::from_static("https://api.mistral.ai/v1/"),
                // Native genai providers resolve normally
                _ => return Ok(target),
            };

            let adapter_kind = match target_provider.as_str() {
                "openrouter" | "mistral" | "azure" => AdapterKind::OpenAI,
                _ => model.adapter_kind,
            };
            let resolved_model = ModelIden::new(adapter_kind, model.model_name.clone());

            Ok(ServiceTarget {
                endpoint,
                auth: target.auth,
                model: resolved_model,
            })
        },
    );

    Client::builder()
        .with_auth_resolver(auth_resolver)
        .with_service_target_resolver(target_resolver)
        .build()
}

/// Check if a provider is natively supported by genai
pub fn is_genai_native(provider: &str) -> bool {
    matches!(
        provider.to_lowercase().as_str(),
        "openai"
            | "anthropic"
            | "gemini"
            | "ollama"
            | "groq"
            | "xai"
            | "deepseek"
            | "cohere"
            | "fireworks"
            | "together"
    )
}

/// Check if a provider can be handled by genai (native or via OpenAI-compat)
pub fn is_genai_supported(provider: &str) -> bool {
    is_genai_native(provider)
        || matches!(
            provider.to_lowercase().as_str(),
            "azure" | "openrouter" | "mistral"
        )
}
