//! Presentation layer for symptom-triage
//!
//! This crate contains CLI definitions, presentation configuration,
//! and the console and JSON output formatters.

pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
pub use output::set_color_enabled;
