//! Core types for model interactions
//!
//! This module contains all the shared types used across providers, tools
//! and the agent loop.

mod message;
mod tool;

pub use message::{ChatMessage, ContentPart, ImageSource, MessageContent, MessageRole};
pub use tool::{Tool, ToolCall, ToolChoice, ToolOutcome, ToolResult};
