//! Presentation layer for nl2sparql
//!
//! This crate contains CLI definitions, the startup banner, output
//! formatters, progress reporters, and the interactive chat interface.

pub mod banner;
pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::StageReporter;
