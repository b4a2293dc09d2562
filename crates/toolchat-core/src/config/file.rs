//! YAML configuration files
//!
//! Supports user-level (~/.config/toolchat/config.yaml) and workspace-level
//! (.config/toolchat/config.yaml) config, plus any explicit path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

/// Configuration file structure
///
/// Every field is optional; absent fields fall through to the next layer.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    /// Default provider and model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultSettings>,

    /// Output budget per model call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Custom API base URL for the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Replaces the built-in system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolSettings>,
}

/// Default settings for the config
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DefaultSettings {
    /// Default provider name
    pub provider: Option<String>,
    /// Default model name
    pub model: Option<String>,
}

/// Tool availability
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ToolSettings {
    /// Tools hidden from the model
    #[serde(default)]
    pub disabled: Vec<String>,
}

/// Where a config file sits in the layering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// User-level config (~/.config/toolchat/config.yaml)
    User,
    /// Workspace-level config (.config/toolchat/config.yaml in workspace root)
    Workspace,
    /// A file named on the command line
    Explicit,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::User => "user",
            ConfigLevel::Workspace => "workspace",
            ConfigLevel::Explicit => "explicit",
        }
    }
}

/// One YAML config file on disk
///
/// A missing or blank file reads as an empty configuration.
///
/// # Example
///
/// ```no_run
/// use toolchat_core::config::ConfigSource;
///
/// let user = ConfigSource::user().load()?;
/// let workspace = ConfigSource::workspace("/path/to/workspace").load()?;
/// # Ok::<(), toolchat_core::config::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    level: ConfigLevel,
}

impl ConfigSource {
    pub fn new(path: impl Into<PathBuf>, level: ConfigLevel) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }

    /// User-level config (~/.config/toolchat/config.yaml)
    pub fn user() -> Self {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("toolchat").join("config.yaml"), ConfigLevel::User)
    }

    /// Workspace-level config (.config/toolchat/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        let path = workspace_root.as_ref().join(".config").join("toolchat").join("config.yaml");
        Self::new(path, ConfigLevel::Workspace)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> ConfigLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }
}

/// Load an explicitly named config file; unlike the layered files it must exist
pub fn load_explicit(path: impl AsRef<Path>) -> ConfigResult<ConfigFile> {
    let source = ConfigSource::new(path.as_ref(), ConfigLevel::Explicit);
    if !source.exists() {
        return Err(ConfigError::NotFound(path.as_ref().display().to_string()));
    }
    source.load()
}
