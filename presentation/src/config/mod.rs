//! Presentation-level configuration
//!
//! Resolved output settings after merging the config file with CLI flags.

use crate::cli::commands::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json"
    pub format: Option<String>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Build from the `[output]` file section values.
    pub fn from_file(format: Option<triage_domain::OutputFormat>, color: bool) -> Self {
        Self {
            format: format.map(|f| f.to_string()),
            color,
        }
    }

    /// CLI format wins over the configured one; unknown names fall back to text.
    pub fn resolve_format(&self, cli: Option<OutputFormat>) -> OutputFormat {
        if let Some(format) = cli {
            return format;
        }
        match self.format.as_deref().map(str::parse::<triage_domain::OutputFormat>) {
            Some(Ok(triage_domain::OutputFormat::Json)) => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }

    /// Color is on unless disabled by the file or by `--no-color`.
    pub fn use_color(&self, no_color_flag: bool) -> bool {
        self.color && !no_color_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OutputConfig::default();
        assert_eq!(config.resolve_format(None), OutputFormat::Text);
        assert!(config.use_color(false));
        assert!(!config.use_color(true));
    }

    #[test]
    fn test_file_format_used_without_flag() {
        let config = OutputConfig::from_file(Some(triage_domain::OutputFormat::Json), true);
        assert_eq!(config.resolve_format(None), OutputFormat::Json);
        assert_eq!(config.resolve_format(Some(OutputFormat::Text)), OutputFormat::Text);
    }

    #[test]
    fn test_unknown_format_falls_back_to_text() {
        let config = OutputConfig {
            format: Some("yaml".to_string()),
            color: false,
        };
        assert_eq!(config.resolve_format(None), OutputFormat::Text);
        assert!(!config.use_color(false));
    }
}
