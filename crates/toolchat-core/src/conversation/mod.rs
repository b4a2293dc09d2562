//! Conversation state
//!
//! The transcript is the exact context sent to the model on every call, so it
//! only ever grows: messages are appended at the tail and never edited,
//! reordered or removed. It lives as long as the agent that owns it.

mod store;

pub use store::Conversation;
