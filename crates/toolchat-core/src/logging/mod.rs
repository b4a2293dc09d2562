//! Logging abstractions
//!
//! Everything that logs takes an `Arc<dyn Logger>`, so the interactive shell
//! can route output to a file while tests stay silent.

mod traits;
mod noop;
mod console;
pub mod file_logger;

pub use traits::Logger;
pub use noop::NoOpLogger;
pub use console::ConsoleLogger;
pub use file_logger::{FileLogger, LogLevel};
