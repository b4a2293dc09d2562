//! The interactive loop

use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use toolchat_core::tools::builtin::{execute_script, find_script};
use toolchat_core::Agent;

use crate::error::CliResult;
use crate::render::{self, ASSISTANT_COLOR, ERROR_COLOR, RESULT_COLOR, TOOL_COLOR};

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    Exit,
    /// Attach an image to the next message
    Image,
    /// Run a script without involving the model
    Run(&'a str),
    Chat(&'a str),
}

impl<'a> Command<'a> {
    pub fn parse(input: &'a str) -> Self {
        if input.eq_ignore_ascii_case("exit") {
            return Command::Exit;
        }
        if input.eq_ignore_ascii_case("image") {
            return Command::Image;
        }
        match (input.get(..4), input.get(4..)) {
            (Some(head), Some(rest)) if head.eq_ignore_ascii_case("run ") => Command::Run(rest.trim()),
            _ => Command::Chat(input),
        }
    }
}

/// Strip surrounding whitespace and quotes from a dragged-in path
pub fn clean_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().trim_matches(|c| c == '"' || c == '\''))
}

struct Input {
    lines: Lines<BufReader<Stdin>>,
}

impl Input {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Prompt and read one line; `None` at end of input
    async fn ask(&mut self, prompt: &str) -> CliResult<Option<String>> {
        render::prompt(prompt)?;
        Ok(self.lines.next_line().await?)
    }
}

pub async fn run(agent: &mut Agent) -> CliResult<()> {
    render::banner();
    let mut input = Input::new();

    loop {
        let Some(line) = input.ask("\n\nYou: ").await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match Command::parse(line) {
            Command::Exit => break,
            Command::Image => image_turn(agent, &mut input).await?,
            Command::Run(script) => run_script(script).await,
            Command::Chat(text) => {
                let reply = agent.process_turn(text, None).await;
                render::print_reply(&reply);
            }
        }
    }

    render::print_colored("Thanks for chatting, see you soon!", ASSISTANT_COLOR);
    Ok(())
}

async fn image_turn(agent: &mut Agent, input: &mut Input) -> CliResult<()> {
    let Some(raw) = input.ask("Drag and drop your image here: ").await? else {
        return Ok(());
    };
    let path = clean_path(&raw);
    if !path.is_file() {
        render::print_colored(
            &format!("Invalid image path: {}\nPlease try again!", path.display()),
            ERROR_COLOR,
        );
        return Ok(());
    }

    let Some(prompt) = input.ask("You (prompt for image): ").await? else {
        return Ok(());
    };
    render::print_colored(&format!("Processing image at path: {}", path.display()), TOOL_COLOR);
    let reply = agent.process_turn(prompt.trim(), Some(&path)).await;
    render::print_reply(&reply);
    Ok(())
}

async fn run_script(script: &str) {
    match find_script(script) {
        Some(path) => {
            render::print_colored(&format!("Attempting to run: {}", path.display()), ASSISTANT_COLOR);
            let outcome = execute_script(&path).await;
            let color = if outcome.is_failure() { ERROR_COLOR } else { RESULT_COLOR };
            render::print_colored(outcome.text(), color);
        }
        None => {
            let full_path = std::env::current_dir()
                .map(|cwd| cwd.join(script))
                .unwrap_or_else(|_| Path::new(script).to_path_buf());
            render::print_colored(
                &format!("No script matching '{}' found at '{}'.", script, full_path.display()),
                ERROR_COLOR,
            );
        }
    }
}
