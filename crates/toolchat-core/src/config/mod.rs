//! Configuration
//!
//! Settings come from YAML files layered user < workspace < explicit file;
//! `AgentSettings::resolve` merges the layers into what the agent runs with.

mod error;
mod file;
mod settings;

pub use error::{ConfigError, ConfigResult};
pub use file::{load_explicit, ConfigFile, ConfigLevel, ConfigSource, DefaultSettings, ToolSettings};
pub use settings::{AgentSettings, DEFAULT_MODEL, DEFAULT_PROVIDER};
