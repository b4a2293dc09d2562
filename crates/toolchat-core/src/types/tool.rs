//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::ContentPart;

/// Tool definition advertised to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool name (function name)
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl Tool {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: None,
        }
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// Tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call
    pub id: String,
    /// Name of the tool being called
    pub name: String,
    /// Input arguments for the tool
    pub input: Value,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Lift a tool call out of a `ToolUse` content part
    pub fn from_part(part: &ContentPart) -> Option<Self> {
        match part {
            ContentPart::ToolUse { id, name, input } => Some(Self::new(id, name, input.clone())),
            _ => None,
        }
    }

    /// The `ToolUse` content part for this call
    pub fn to_part(&self) -> ContentPart {
        ContentPart::tool_use(&self.id, &self.name, self.input.clone())
    }
}

/// What a tool produced
///
/// Tools never fail towards the loop: a failure is narrated text the model
/// reads like any other result. The tag lets callers tell the two apart
/// without inspecting the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum ToolOutcome {
    Ok(String),
    Failed(String),
}

impl ToolOutcome {
    pub fn ok(text: impl Into<String>) -> Self {
        ToolOutcome::Ok(text.into())
    }

    pub fn failed(text: impl Into<String>) -> Self {
        ToolOutcome::Failed(text.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ToolOutcome::Failed(_))
    }

    /// The narrated text, whichever way the tool went
    pub fn text(&self) -> &str {
        match self {
            ToolOutcome::Ok(text) | ToolOutcome::Failed(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ToolOutcome::Ok(text) | ToolOutcome::Failed(text) => text,
        }
    }
}

/// Tool result to send back to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this is responding to
    #[serde(rename = "callId")]
    pub call_id: String,
    /// What the tool produced
    pub outcome: ToolOutcome,
}

impl ToolResult {
    /// Collapse to the plain-text `ToolResult` part the model sees
    pub fn into_part(self) -> ContentPart {
        ContentPart::tool_result(self.call_id, self.outcome.into_text())
    }
}

/// Tool choice option for requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide whether to use tools
    #[default]
    Auto,
    /// Don't use tools
    None,
    /// Force tool use
    Required,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_creation() {
        let tool = Tool::new("read_file", "Read a file")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "path": { "type": "string" }
                },
                "required": ["path"]
            }));

        assert_eq!(tool.name, "read_file");
        assert_eq!(tool.input_schema.unwrap()["required"], json!(["path"]));
        assert!(Tool::new("noop", "Nothing").input_schema.is_none());
    }

    #[test]
    fn test_tool_call_from_part() {
        let part = ContentPart::tool_use("toolu_1", "list_files", json!({"path": "."}));
        let call = ToolCall::from_part(&part).unwrap();
        assert_eq!(call.name, "list_files");
        assert_eq!(call.to_part(), part);

        assert!(ToolCall::from_part(&ContentPart::text("hi")).is_none());
    }

    #[test]
    fn test_tool_result() {
        let failed = ToolResult {
            call_id: "call_456".to_string(),
            outcome: ToolOutcome::failed("Error reading file: missing.txt"),
        };
        assert!(failed.outcome.is_failure());
        assert_eq!(
            failed.into_part(),
            ContentPart::tool_result("call_456", "Error reading file: missing.txt")
        );
    }

    #[test]
    fn test_tool_choice_default() {
        assert_eq!(ToolChoice::default(), ToolChoice::Auto);
        assert_eq!(serde_json::to_string(&ToolChoice::Auto).unwrap(), "\"auto\"");
    }
}
