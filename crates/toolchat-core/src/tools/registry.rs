//! Tool registry for dispatching model tool calls
//!
//! The ToolRegistry holds the handlers available to the model, keyed by
//! name. It produces the tool catalog sent with every model request and
//! executes the model's tool calls. Tools the user disabled are neither
//! advertised nor callable.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use thiserror::Error;

use super::builtin;
use super::handler::ToolHandler;
use crate::logging::Logger;
use crate::types::{Tool, ToolCall, ToolOutcome, ToolResult};

/// Errors from registry lookups
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    NotFound(String),
}

struct RegisteredTool {
    descriptor: Tool,
    handler: Arc<dyn ToolHandler>,
    enabled: bool,
}

/// Registry of tool handlers, in registration order
pub struct ToolRegistry {
    tools: RwLock<Vec<RegisteredTool>>,
    /// User-configured enabled/disabled state, applied to later registrations too
    tool_states: RwLock<HashMap<String, bool>>,
    logger: Arc<dyn Logger>,
}

impl ToolRegistry {
    /// Create an empty tool registry
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            tools: RwLock::new(Vec::new()),
            tool_states: RwLock::new(HashMap::new()),
            logger,
        }
    }

    /// Create a registry holding every built-in tool
    ///
    /// `search_api_key` feeds the web search tool; without it the tool is still
    /// advertised and narrates the missing key when called.
    pub fn with_builtin_tools(search_api_key: Option<String>, logger: Arc<dyn Logger>) -> Self {
        let registry = Self::new(Arc::clone(&logger));
        for handler in builtin::builtin_tools(search_api_key, logger) {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler; a handler with the same name is replaced in place
    pub fn register(&self, handler: Arc<dyn ToolHandler>) {
        let descriptor = handler.descriptor();
        let enabled = self
            .tool_states
            .read()
            .get(&descriptor.name)
            .copied()
            .unwrap_or(true);
        let name = descriptor.name.clone();
        let entry = RegisteredTool {
            descriptor,
            handler,
            enabled,
        };

        let mut tools = self.tools.write();
        if let Some(existing) = tools.iter_mut().find(|t| t.descriptor.name == name) {
            self.logger.debug(&format!("[ToolRegistry] Replacing tool: {}", name));
            *existing = entry;
        } else {
            self.logger.debug(&format!("[ToolRegistry] Registered tool: {}", name));
            tools.push(entry);
        }
    }

    /// Look up the handler for an enabled tool
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ToolHandler>, ToolError> {
        self.tools
            .read()
            .iter()
            .find(|t| t.descriptor.name == name && t.enabled)
            .map(|t| Arc::clone(&t.handler))
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    /// Tool catalog for the model (enabled only, registration order)
    ///
    /// A descriptor without a schema is sent with an empty object schema.
    pub fn get_llm_tools(&self) -> Vec<Tool> {
        self.tools
            .read()
            .iter()
            .filter(|t| t.enabled)
            .map(|t| {
                let mut tool = t.descriptor.clone();
                tool.input_schema
                    .get_or_insert_with(|| serde_json::json!({ "type": "object", "properties": {} }));
                tool
            })
            .collect()
    }

    /// Enable or disable a tool
    pub fn set_tool_enabled(&self, name: &str, enabled: bool) {
        self.tool_states.write().insert(name.to_string(), enabled);

        let mut tools = self.tools.write();
        if let Some(tool) = tools.iter_mut().find(|t| t.descriptor.name == name) {
            tool.enabled = enabled;
        }
    }

    /// Run a tool by name
    ///
    /// Never fails: an unknown name becomes a narrated failure.
    pub async fn execute(&self, name: &str, input: &Value) -> ToolOutcome {
        let handler = match self.resolve(name) {
            Ok(handler) => handler,
            Err(e) => {
                self.logger.warn(&format!("[ToolRegistry] {}", e));
                return ToolOutcome::failed(e.to_string());
            }
        };

        self.logger.info(&format!("[ToolRegistry] Calling tool: {}", name));
        let outcome = handler.execute(input).await;
        if outcome.is_failure() {
            self.logger.warn(&format!(
                "[ToolRegistry] Tool {} reported failure: {}",
                name,
                outcome.text()
            ));
        }
        outcome
    }

    /// Execute a tool call from a model response
    pub async fn execute_tool_call(&self, tool_call: &ToolCall) -> ToolResult {
        ToolResult {
            call_id: tool_call.id.clone(),
            outcome: self.execute(&tool_call.name, &tool_call.input).await,
        }
    }

    /// Get count of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.read().len()
    }

    /// Get count of enabled tools
    pub fn enabled_tool_count(&self) -> usize {
        self.tools.read().iter().filter(|t| t.enabled).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl ToolHandler for EchoTool {
        fn descriptor(&self) -> Tool {
            Tool::new("echo", "Echo the text argument").with_schema(json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            }))
        }

        async fn execute(&self, input: &Value) -> ToolOutcome {
            match input.get("text").and_then(Value::as_str) {
                Some(text) => ToolOutcome::ok(text),
                None => ToolOutcome::failed("Error echoing: missing required argument 'text'"),
            }
        }
    }

    fn registry() -> ToolRegistry {
        let registry = ToolRegistry::new(Arc::new(NoOpLogger));
        registry.register(Arc::new(EchoTool));
        registry
    }

    #[test]
    fn test_resolve() {
        let registry = registry();
        assert!(registry.resolve("echo").is_ok());
        assert_eq!(
            registry.resolve("missing").err(),
            Some(ToolError::NotFound("missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_execute_known_tool() {
        let registry = registry();
        let outcome = registry.execute("echo", &json!({ "text": "hi" })).await;
        assert_eq!(outcome, ToolOutcome::ok("hi"));

        let outcome = registry.execute("echo", &json!({})).await;
        assert!(outcome.is_failure());
    }

    #[tokio::test]
    async fn test_unknown_tool_is_narrated() {
        let registry = registry();
        let call = ToolCall::new("toolu_9", "teleport", json!({}));
        let result = registry.execute_tool_call(&call).await;

        assert_eq!(result.call_id, "toolu_9");
        assert_eq!(result.outcome, ToolOutcome::failed("Unknown tool: teleport"));
    }

    #[tokio::test]
    async fn test_disabled_tool_is_hidden_and_unknown() {
        let registry = registry();
        registry.set_tool_enabled("echo", false);

        assert!(registry.get_llm_tools().is_empty());
        assert_eq!(registry.tool_count(), 1);
        assert_eq!(registry.enabled_tool_count(), 0);
        assert_eq!(
            registry.execute("echo", &json!({ "text": "hi" })).await,
            ToolOutcome::failed("Unknown tool: echo")
        );
    }

    #[test]
    fn test_state_applies_to_later_registration() {
        let registry = ToolRegistry::new(Arc::new(NoOpLogger));
        registry.set_tool_enabled("echo", false);
        registry.register(Arc::new(EchoTool));
        assert_eq!(registry.enabled_tool_count(), 0);
    }

    #[test]
    fn test_register_replaces_same_name() {
        let registry = registry();
        registry.register(Arc::new(EchoTool));
        assert_eq!(registry.tool_count(), 1);
        assert_eq!(registry.get_llm_tools().len(), 1);
    }

    #[test]
    fn test_schemaless_tool_gets_empty_object_schema() {
        struct Bare;

        #[async_trait]
        impl ToolHandler for Bare {
            fn descriptor(&self) -> Tool {
                Tool::new("bare", "No arguments")
            }

            async fn execute(&self, _input: &Value) -> ToolOutcome {
                ToolOutcome::ok("done")
            }
        }

        let registry = ToolRegistry::new(Arc::new(NoOpLogger));
        registry.register(Arc::new(Bare));
        assert_eq!(
            registry.get_llm_tools()[0].input_schema,
            Some(json!({ "type": "object", "properties": {} }))
        );
    }

    #[test]
    fn test_builtin_catalog_order() {
        let registry = ToolRegistry::with_builtin_tools(None, Arc::new(NoOpLogger));
        let names: Vec<String> = registry.get_llm_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "create_folder",
                "create_file",
                "write_to_file",
                "read_file",
                "list_files",
                "tavily_search",
                "execute_script",
            ]
        );
        assert!(registry.get_llm_tools().iter().all(|t| t.input_schema.is_some()));
    }
}
