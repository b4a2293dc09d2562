//! Turn orchestration
//!
//! An [`Agent`] turns one line of user input into one reply:
//!
//! 1. append the user message (optionally with an encoded image)
//! 2. ask the model, offering the enabled tool catalog
//! 3. for each tool-use segment, run the tool, record the exchange and ask the
//!    model once more to narrate the outcome
//! 4. store the collected reply as a single assistant message
//!
//! Failures never escape a turn: they come back as fixed reply strings and
//! the transcript stays consistent.

mod orchestrator;
mod prompt;

pub use orchestrator::{
    Agent, TurnEvent, TurnObserver, DEFAULT_MAX_TOKENS, FOLLOW_UP_ERROR_NOTE, IMAGE_ERROR_REPLY,
    IMAGE_PROMPT_PREFIX, SERVICE_ERROR_REPLY,
};
pub use prompt::default_system_prompt;
