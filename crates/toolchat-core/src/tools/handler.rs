//! Tool handler trait

use async_trait::async_trait;
use serde_json::Value;

use crate::types::{Tool, ToolOutcome};

/// A callable capability exposed to the model
///
/// Arguments arrive exactly as the model produced them; the handler reads
/// what it needs and narrates anything missing or broken as a failure.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Descriptor advertised to the model (name, description, input schema)
    fn descriptor(&self) -> Tool;

    /// Run the tool
    async fn execute(&self, input: &Value) -> ToolOutcome;

    /// Registry key
    fn name(&self) -> String {
        self.descriptor().name
    }
}

/// Read a required string argument, or the failure text to hand back
///
/// `action` completes the sentence "Error <action>: ...".
pub fn required_str<'a>(input: &'a Value, key: &str, action: &str) -> Result<&'a str, ToolOutcome> {
    input.get(key).and_then(Value::as_str).ok_or_else(|| {
        ToolOutcome::failed(format!(
            "Error {}: missing required argument '{}'",
            action, key
        ))
    })
}
