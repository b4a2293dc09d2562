//! Effective agent settings, merged from config layers

use crate::agent::DEFAULT_MAX_TOKENS;
use crate::providers::{ChatOptions, ProviderModelConfig};

use super::file::ConfigFile;

pub const DEFAULT_PROVIDER: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";

/// Settings the agent runs with
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSettings {
    pub provider: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub api_base: Option<String>,
    /// `None` keeps the built-in prompt
    pub system_prompt: Option<String>,
    pub disabled_tools: Vec<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            api_base: None,
            system_prompt: None,
            disabled_tools: Vec::new(),
        }
    }
}

impl AgentSettings {
    /// Merge layers over the defaults; later layers win field by field
    pub fn resolve<'a>(layers: impl IntoIterator<Item = &'a ConfigFile>) -> Self {
        let mut settings = Self::default();
        for layer in layers {
            settings.apply(layer);
        }
        settings
    }

    /// Overlay the fields a layer sets
    pub fn apply(&mut self, layer: &ConfigFile) {
        if let Some(defaults) = &layer.defaults {
            if let Some(provider) = &defaults.provider {
                self.provider = provider.clone();
            }
            if let Some(model) = &defaults.model {
                self.model = model.clone();
            }
        }
        if let Some(max_tokens) = layer.max_tokens {
            self.max_tokens = max_tokens;
        }
        if layer.temperature.is_some() {
            self.temperature = layer.temperature;
        }
        if layer.api_base.is_some() {
            self.api_base = layer.api_base.clone();
        }
        if layer.system_prompt.is_some() {
            self.system_prompt = layer.system_prompt.clone();
        }
        if let Some(tools) = &layer.tools {
            self.disabled_tools = tools.disabled.clone();
        }
    }

    /// Model config for the provider, with the resolved API key
    pub fn model_config(&self, api_key: Option<String>) -> ProviderModelConfig {
        ProviderModelConfig {
            model: self.model.clone(),
            api_key,
            api_base: self.api_base.clone(),
        }
    }

    /// Per-call options template
    pub fn chat_options(&self) -> ChatOptions {
        let options = ChatOptions::new().with_max_tokens(self.max_tokens);
        match self.temperature {
            Some(temperature) => options.with_temperature(temperature),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DefaultSettings, ToolSettings};

    #[test]
    fn test_defaults() {
        let settings = AgentSettings::resolve(std::iter::empty());
        assert_eq!(settings.provider, "anthropic");
        assert_eq!(settings.model, "claude-3-5-sonnet-20240620");
        assert_eq!(settings.max_tokens, 4000);
        assert!(settings.disabled_tools.is_empty());
    }

    #[test]
    fn test_later_layers_win() {
        let user = ConfigFile {
            defaults: Some(DefaultSettings {
                provider: Some("openai".to_string()),
                model: Some("gpt-4o".to_string()),
            }),
            max_tokens: Some(1000),
            tools: Some(ToolSettings {
                disabled: vec!["execute_script".to_string()],
            }),
            ..Default::default()
        };
        let workspace = ConfigFile {
            defaults: Some(DefaultSettings {
                provider: None,
                model: Some("gpt-4o-mini".to_string()),
            }),
            temperature: Some(0.3),
            ..Default::default()
        };

        let settings = AgentSettings::resolve([&user, &workspace]);
        assert_eq!(settings.provider, "openai");
        assert_eq!(settings.model, "gpt-4o-mini");
        assert_eq!(settings.max_tokens, 1000);
        assert_eq!(settings.temperature, Some(0.3));
        assert_eq!(settings.disabled_tools, vec!["execute_script"]);
    }

    #[test]
    fn test_model_config_and_options() {
        let settings = AgentSettings {
            api_base: Some("http://localhost:9000".to_string()),
            temperature: Some(0.1),
            ..Default::default()
        };

        let model = settings.model_config(Some("sk-test".to_string()));
        assert_eq!(model.model, DEFAULT_MODEL);
        assert_eq!(model.api_key.as_deref(), Some("sk-test"));
        assert_eq!(model.api_base.as_deref(), Some("http://localhost:9000"));

        let options = settings.chat_options();
        assert_eq!(options.max_tokens, Some(4000));
        assert_eq!(options.temperature, Some(0.1));
    }
}
