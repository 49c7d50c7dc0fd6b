//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into engine types once
//! validated.

mod data;
mod output;
mod recommender;
mod resolver;

pub use data::FileDataConfig;
pub use output::FileOutputConfig;
pub use recommender::FileRecommenderConfig;
pub use resolver::FileResolverConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use triage_application::EngineConfig;
use triage_domain::DomainError;
use triage_domain::config::validation::{ConfigIssue, has_errors};

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{} configuration error(s): {}", .0.len(), .0.join("; "))]
    Invalid(Vec<String>),

    #[error(transparent)]
    Engine(#[from] DomainError),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Disease resolver settings
    pub resolver: FileResolverConfig,
    /// Specialist recommender settings
    pub recommender: FileRecommenderConfig,
    /// Reference data file locations
    pub data: FileDataConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Numeric ranges and weight sanity come from the engine sections, data
    /// paths are checked for existence.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.resolver.validate());
        issues.extend(self.recommender.validate());
        issues.extend(self.data.validate());
        issues
    }

    /// Convert to the engine configuration.
    ///
    /// Fails if validation reports any error; warnings are ignored here and
    /// left to the caller to display.
    pub fn to_engine_config(&self) -> Result<EngineConfig, ConfigValidationError> {
        let issues = self.validate();
        if has_errors(&issues) {
            return Err(ConfigValidationError::Invalid(
                issues
                    .into_iter()
                    .filter(ConfigIssue::is_error)
                    .map(|i| i.message)
                    .collect(),
            ));
        }

        let config = EngineConfig::default()
            .with_resolver(self.resolver.to_params())
            .with_recommender(self.recommender.to_params())
            .with_max_results(self.resolver.max_results)
            .with_top_n(self.recommender.top_n);
        config.validate()?;
        Ok(config)
    }
}
