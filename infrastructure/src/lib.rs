//! Infrastructure layer for symptom-triage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: reference data loaders (files on disk and the
//! embedded default dataset) and configuration file loading.

pub mod config;
pub mod reference;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDataConfig, FileOutputConfig,
    FileRecommenderConfig, FileResolverConfig,
};
pub use reference::{EmbeddedReferenceSource, FileReferenceSource};
