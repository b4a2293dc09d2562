//! Console logger implementation

use super::traits::Logger;

/// A logger that writes to stderr, leaving stdout to the conversation
#[derive(Debug, Clone, Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }

    fn line(level: &str, message: &str) -> String {
        format!("[toolchat] {}: {}", level, message)
    }
}

impl Logger for ConsoleLogger {
    fn debug(&self, message: &str) {
        eprintln!("{}", Self::line("DEBUG", message));
    }

    fn info(&self, message: &str) {
        eprintln!("{}", Self::line("INFO", message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", Self::line("WARN", message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", Self::line("ERROR", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        assert_eq!(
            ConsoleLogger::line("WARN", "tool failed"),
            "[toolchat] WARN: tool failed"
        );
    }
}
