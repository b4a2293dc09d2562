//! Append-only message log

use crate::types::{ChatMessage, ContentPart, MessageRole};

/// Ordered, append-only dialogue transcript
///
/// Single writer: appending takes `&mut self`, so the owning agent is the
/// only thing that can extend it during a turn.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the tail
    ///
    /// Empty messages are never persisted; returns `false` when the message
    /// was dropped for that reason.
    pub fn append(&mut self, message: ChatMessage) -> bool {
        if message.is_empty() {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Every non-empty message, in order, ready to send as model context
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_empty())
            .cloned()
            .collect()
    }

    /// Read-only view of the transcript
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Tool-use ids that have no matching tool result yet
    pub fn pending_tool_uses(&self) -> Vec<&str> {
        let mut pending: Vec<&str> = Vec::new();
        for message in &self.messages {
            for part in message.parts() {
                match (message.role, part) {
                    (MessageRole::Assistant, ContentPart::ToolUse { id, .. }) => {
                        pending.push(id.as_str());
                    }
                    (MessageRole::User, ContentPart::ToolResult { tool_use_id, .. }) => {
                        pending.retain(|id| *id != tool_use_id.as_str());
                    }
                    _ => {}
                }
            }
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_starts_empty() {
        let conversation = Conversation::new();
        assert!(conversation.is_empty());
        assert!(conversation.snapshot().is_empty());
        assert!(conversation.last().is_none());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.append(ChatMessage::user("first")));
        assert!(conversation.append(ChatMessage::assistant("second")));
        assert!(conversation.append(ChatMessage::user("third")));

        let texts: Vec<String> = conversation
            .snapshot()
            .iter()
            .map(ChatMessage::text_content)
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(conversation.last().and_then(|m| m.text()), Some("third"));
    }

    #[test]
    fn test_empty_messages_are_dropped() {
        let mut conversation = Conversation::new();
        assert!(!conversation.append(ChatMessage::user("")));
        assert!(!conversation.append(ChatMessage::with_parts(MessageRole::Assistant, vec![])));
        assert!(conversation.is_empty());
    }

    #[test]
    fn test_pending_tool_uses() {
        let mut conversation = Conversation::new();
        conversation.append(ChatMessage::user("list files"));
        conversation.append(ChatMessage::with_parts(
            MessageRole::Assistant,
            vec![ContentPart::tool_use("toolu_1", "list_files", json!({}))],
        ));
        assert_eq!(conversation.pending_tool_uses(), vec!["toolu_1"]);

        conversation.append(ChatMessage::with_parts(
            MessageRole::User,
            vec![ContentPart::tool_result("toolu_1", "a.txt")],
        ));
        assert!(conversation.pending_tool_uses().is_empty());
    }
}
