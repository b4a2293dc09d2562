//! Tool management module
//!
//! Tools are local capabilities the model may invoke. Each one is a
//! `ToolHandler` registered by name in a `ToolRegistry`; the registry
//! advertises descriptors to the model and dispatches its tool calls.
//!
//! ```text
//!   model response ── ToolUse{id, name, input} ──▶ ToolRegistry::execute_tool_call
//!                                                        │
//!                                       resolve(name) ───┤── NotFound ─▶ "Unknown tool: <name>"
//!                                                        ▼
//!                                              ToolHandler::execute(input)
//!                                                        │
//!                                  ToolOutcome::{Ok, Failed}(text) ─▶ ToolResult{id, text}
//! ```
//!
//! Handlers never return errors: a failure is a `ToolOutcome::Failed` whose
//! text the model reads like any other result.

mod handler;
mod registry;
pub mod builtin;

pub use handler::{required_str, ToolHandler};
pub use registry::{ToolError, ToolRegistry};
