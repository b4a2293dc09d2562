//! Startup errors
//!
//! Only setup can fail the process; once the shell runs, turn failures are
//! replies, not errors.

use thiserror::Error;
use toolchat_core::{ConfigError, ProviderError};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Provider(#[from] ProviderError),

    #[error("No API key for {provider}: set {env_var} (or add it to .env) or store it in the system keychain")]
    MissingApiKey { provider: String, env_var: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
