//! toolchat: an interactive shell around the toolchat agent

mod error;
mod render;
mod repl;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use toolchat_core::config::{load_explicit, AgentSettings, ConfigFile, ConfigSource, DefaultSettings};
use toolchat_core::secrets::EnvSecretStore;
use toolchat_core::{
    create_provider, default_secret_chain, Agent, ConsoleLogger, FileLogger, Logger, Provider,
    SecretStore, ToolRegistry,
};

use crate::error::{CliError, CliResult};

#[derive(Parser, Debug)]
#[command(
    name = "toolchat",
    about = "Chat with a model that can use local tools",
    version
)]
struct Cli {
    /// Model provider (anthropic, openai, ollama, ...)
    #[arg(long)]
    provider: Option<String>,

    /// Model identifier
    #[arg(long)]
    model: Option<String>,

    /// Output budget per model call
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Custom API base URL
    #[arg(long)]
    api_base: Option<String>,

    /// Extra config file, applied over the user and workspace config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log to stderr instead of the debug log file
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command-line flags as the topmost config layer
    fn as_layer(&self) -> ConfigFile {
        ConfigFile {
            defaults: Some(DefaultSettings {
                provider: self.provider.clone(),
                model: self.model.clone(),
            }),
            max_tokens: self.max_tokens,
            api_base: self.api_base.clone(),
            ..Default::default()
        }
    }
}

/// user config < workspace config < --config file < flags
fn resolve_settings(cli: &Cli, logger: &dyn Logger) -> CliResult<AgentSettings> {
    let mut sources = vec![ConfigSource::user()];
    if let Ok(cwd) = std::env::current_dir() {
        sources.push(ConfigSource::workspace(cwd));
    }

    let mut layers = Vec::with_capacity(sources.len() + 2);
    for source in &sources {
        if source.exists() {
            logger.debug(&format!(
                "[toolchat] {} config: {}",
                source.level().as_str(),
                source.path().display()
            ));
        }
        layers.push(source.load()?);
    }
    if let Some(path) = &cli.config {
        logger.debug(&format!("[toolchat] explicit config: {}", path.display()));
        layers.push(load_explicit(path)?);
    }
    layers.push(cli.as_layer());
    Ok(AgentSettings::resolve(&layers))
}

async fn run(cli: Cli) -> CliResult<()> {
    let logger: Arc<dyn Logger> = if cli.verbose {
        Arc::new(ConsoleLogger::new())
    } else {
        Arc::new(FileLogger::new("toolchat"))
    };

    let settings = resolve_settings(&cli, logger.as_ref())?;
    logger.info(&format!(
        "[toolchat] provider={} model={} max_tokens={}",
        settings.provider, settings.model, settings.max_tokens
    ));

    let secrets = default_secret_chain();
    let api_key = secrets.find_store(&settings.provider).and_then(|store| {
        logger.debug(&format!("[toolchat] {} key from {}", settings.provider, store.name()));
        store.get(&settings.provider)
    });
    // genai providers resolve their own keys; the native Anthropic client needs one up front
    if api_key.is_none() && settings.provider.eq_ignore_ascii_case("anthropic") {
        let env_var = EnvSecretStore::env_vars_for(&settings.provider)
            .and_then(|vars| vars.first())
            .map(|var| var.to_string())
            .unwrap_or_else(|| format!("{}_API_KEY", settings.provider.to_uppercase()));
        return Err(CliError::MissingApiKey {
            provider: settings.provider.clone(),
            env_var,
        });
    }

    let provider: Arc<dyn Provider> = Arc::from(create_provider(&settings.provider, Arc::clone(&logger))?);

    let tools = ToolRegistry::with_builtin_tools(secrets.get("tavily"), Arc::clone(&logger));
    for name in &settings.disabled_tools {
        tools.set_tool_enabled(name, false);
    }

    let mut agent = Agent::new(provider, tools, settings.model_config(api_key), Arc::clone(&logger))
        .with_options(settings.chat_options())
        .with_observer(render::tool_observer());
    if let Some(prompt) = &settings.system_prompt {
        agent = agent.with_system_prompt(prompt.clone());
    }
    logger.info(&format!(
        "[toolchat] {} of {} tools enabled",
        agent.tools().enabled_tool_count(),
        agent.tools().tool_count()
    ));

    repl::run(&mut agent).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            render::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_layers() {
        let cli = Cli::parse_from([
            "toolchat",
            "--provider",
            "openai",
            "--model",
            "gpt-4o",
            "--max-tokens",
            "1200",
        ]);
        let file = ConfigFile {
            defaults: Some(DefaultSettings {
                provider: Some("ollama".to_string()),
                model: Some("llama3".to_string()),
            }),
            temperature: Some(0.2),
            ..Default::default()
        };

        let settings = AgentSettings::resolve([&file, &cli.as_layer()]);
        assert_eq!(settings.provider, "openai");
        assert_eq!(settings.model, "gpt-4o");
        assert_eq!(settings.max_tokens, 1200);
        assert_eq!(settings.temperature, Some(0.2));
    }

    #[test]
    fn test_no_flags_keep_file_values() {
        let cli = Cli::parse_from(["toolchat"]);
        assert!(!cli.verbose);

        let file = ConfigFile {
            defaults: Some(DefaultSettings {
                provider: Some("ollama".to_string()),
                model: None,
            }),
            ..Default::default()
        };
        let settings = AgentSettings::resolve([&file, &cli.as_layer()]);
        assert_eq!(settings.provider, "ollama");
        assert_eq!(settings.model, "claude-3-5-sonnet-20240620");
        assert_eq!(settings.max_tokens, 4000);
    }
}
