//! File-based debug logger
//!
//! The interactive shell owns the terminal, so diagnostics go to a file
//! (`<tmp>/toolchat-debug.log` unless `TOOLCHAT_LOG_FILE` says otherwise).
//!
//! Environment:
//! - `TOOLCHAT_DEBUG`: `0`/`false` disables file logging entirely
//! - `TOOLCHAT_LOG_LEVEL`: `trace`, `debug`, `info`, `warn` or `error`

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::SystemTime;

use super::traits::Logger;

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl LogLevel {
    /// Parse a level name, case-insensitive
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO "),
            LogLevel::Warn => write!(f, "WARN "),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

struct FileLoggerState {
    file: Option<File>,
    min_level: LogLevel,
    enabled: bool,
}

impl FileLoggerState {
    fn new() -> Self {
        let log_path = log_file_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok();

        let enabled = std::env::var("TOOLCHAT_DEBUG")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(true);
        let min_level = std::env::var("TOOLCHAT_LOG_LEVEL")
            .ok()
            .and_then(|v| LogLevel::parse(&v))
            .unwrap_or(LogLevel::Debug);

        Self { file, min_level, enabled }
    }

    fn write(&mut self, level: LogLevel, module: &str, message: &str) {
        if !self.enabled || level < self.min_level {
            return;
        }

        if let Some(ref mut file) = self.file {
            let timestamp = SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .map(|d| {
                    let secs = d.as_secs();
                    let millis = d.subsec_millis();
                    let hours = (secs % 86400) / 3600;
                    let mins = (secs % 3600) / 60;
                    let secs = secs % 60;
                    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
                })
                .unwrap_or_else(|_| "??:??:??.???".to_string());

            let _ = writeln!(file, "[{}] [{}] [{}] {}", timestamp, level, module, message);
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<Mutex<FileLoggerState>> = OnceLock::new();

fn state() -> &'static Mutex<FileLoggerState> {
    LOGGER.get_or_init(|| Mutex::new(FileLoggerState::new()))
}

/// Log a message at the specified level
pub fn log(level: LogLevel, module: &str, message: &str) {
    if let Ok(mut logger) = state().lock() {
        logger.write(level, module, message);
    }
}

pub fn debug(module: &str, message: &str) {
    log(LogLevel::Debug, module, message);
}

pub fn info(module: &str, message: &str) {
    log(LogLevel::Info, module, message);
}

pub fn warn(module: &str, message: &str) {
    log(LogLevel::Warn, module, message);
}

pub fn error(module: &str, message: &str) {
    log(LogLevel::Error, module, message);
}

fn log_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("TOOLCHAT_LOG_FILE") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    let mut path = std::env::temp_dir();
    path.push("toolchat-debug.log");
    path
}

/// `Logger` that writes through the global debug log file
#[derive(Debug, Clone)]
pub struct FileLogger {
    module: String,
}

impl FileLogger {
    pub fn new(module: impl Into<String>) -> Self {
        Self { module: module.into() }
    }
}

impl Default for FileLogger {
    fn default() -> Self {
        Self::new("toolchat")
    }
}

impl Logger for FileLogger {
    fn debug(&self, message: &str) {
        debug(&self.module, message);
    }

    fn info(&self, message: &str) {
        info(&self.module, message);
    }

    fn warn(&self, message: &str) {
        warn(&self.module, message);
    }

    fn error(&self, message: &str) {
        error(&self.module, message);
    }
}
