//! Terminal output
//!
//! Replies go to stdout in color. Fenced code blocks are printed apart from
//! the surrounding prose, with their language as a header.

use std::io::{self, Write};
use std::sync::Arc;

use crossterm::style::{Color, Stylize};
use toolchat_core::{ToolOutcome, TurnEvent, TurnObserver};

pub const USER_COLOR: Color = Color::White;
pub const ASSISTANT_COLOR: Color = Color::Magenta;
pub const TOOL_COLOR: Color = Color::Blue;
pub const RESULT_COLOR: Color = Color::Green;
pub const CODE_COLOR: Color = Color::Cyan;
pub const ERROR_COLOR: Color = Color::Red;

pub fn print_colored(text: &str, color: Color) {
    println!("{}", text.with(color));
}

/// Print a prompt without a newline and flush it
pub fn prompt(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", text.with(USER_COLOR).bold())?;
    stdout.flush()
}

pub fn banner() {
    for line in [
        "Welcome to toolchat!",
        "Type 'exit' to end the conversation.",
        "Type 'image' to include an image in your message.",
        "Type 'run <script>' to run a script directly.",
        "Supported script types: Python (.py), JavaScript (.js), Bash (.sh, .bash), PowerShell (.ps1), HTML (.html)",
    ] {
        print_colored(line, ASSISTANT_COLOR);
    }
}

/// One piece of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Prose(&'a str),
    Code { language: &'a str, code: &'a str },
}

/// Split a reply on ``` fences; odd pieces are code whose first line names the language
pub fn split_fences(reply: &str) -> Vec<Segment<'_>> {
    reply
        .split("```")
        .enumerate()
        .filter(|(_, piece)| !piece.is_empty())
        .map(|(i, piece)| {
            if i % 2 == 0 {
                return Segment::Prose(piece);
            }
            match piece.split_once('\n') {
                Some((language, code)) => Segment::Code {
                    language: language.trim(),
                    code,
                },
                None => Segment::Code {
                    language: "",
                    code: piece,
                },
            }
        })
        .collect()
}

pub fn print_reply(reply: &str) {
    if reply.is_empty() {
        return;
    }
    for segment in split_fences(reply) {
        match segment {
            Segment::Prose(text) => print_colored(text, ASSISTANT_COLOR),
            Segment::Code { language, code } => {
                if !language.is_empty() {
                    print_colored(&format!("Code ({}):", language), ASSISTANT_COLOR);
                }
                print_colored(code.trim_end(), CODE_COLOR);
            }
        }
    }
}

pub fn print_error(text: &str) {
    eprintln!("{}", text.with(ERROR_COLOR));
}

/// Show tool activity as it happens
pub fn tool_observer() -> TurnObserver {
    Arc::new(|event: &TurnEvent| match event {
        TurnEvent::ToolUse { name, input } => {
            print_colored(&format!("\nTool Used: {}", name), TOOL_COLOR);
            print_colored(&format!("Tool Input: {}", input), TOOL_COLOR);
        }
        TurnEvent::ToolResult { outcome, .. } => {
            let color = match outcome {
                ToolOutcome::Ok(_) => RESULT_COLOR,
                ToolOutcome::Failed(_) => ERROR_COLOR,
            };
            print_colored(&format!("Tool Result: {}", outcome.text()), color);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_reply() {
        assert_eq!(split_fences("Just text."), vec![Segment::Prose("Just text.")]);
        assert!(split_fences("").is_empty());
    }

    #[test]
    fn test_code_block() {
        let reply = "Here you go:\n```python\nprint('hi')\n```\nEnjoy.";
        assert_eq!(
            split_fences(reply),
            vec![
                Segment::Prose("Here you go:\n"),
                Segment::Code {
                    language: "python",
                    code: "print('hi')\n",
                },
                Segment::Prose("\nEnjoy."),
            ]
        );
    }

    #[test]
    fn test_untagged_and_unterminated_blocks() {
        assert_eq!(
            split_fences("```\nls -la\n```"),
            vec![Segment::Code {
                language: "",
                code: "ls -la\n",
            }]
        );
        assert_eq!(
            split_fences("a```rust"),
            vec![
                Segment::Prose("a"),
                Segment::Code {
                    language: "",
                    code: "rust",
                },
            ]
        );
    }
}
