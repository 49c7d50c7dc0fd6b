//! Configuration file loading for symptom-triage
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./triage.toml` or `./.triage.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/symptom-triage/config.toml`
//! 4. Environment: `TRIAGE_<SECTION>__<KEY>`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDataConfig, FileOutputConfig, FileRecommenderConfig,
    FileResolverConfig,
};
pub use loader::ConfigLoader;
