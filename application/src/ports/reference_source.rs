//! Reference data source port.
//!
//! Defines how the engine obtains its immutable reference data (knowledge
//! base, case database, normalisation tables). Infrastructure adapters
//! implement this for files on disk and for the compiled-in default dataset.

use crate::reference::ReferenceData;
use std::path::PathBuf;
use thiserror::Error;
use triage_domain::DomainError;

/// Errors that can occur while loading reference data.
#[derive(Error, Debug)]
pub enum ReferenceSourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("Unsupported reference file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid reference data in {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: DomainError,
    },
}

/// Port for loading reference data.
///
/// Each call to [`load`](ReferenceSource::load) builds a fresh
/// [`ReferenceData`]; the store swaps it in atomically.
pub trait ReferenceSource: Send + Sync {
    /// Load and validate a complete reference data set.
    fn load(&self) -> Result<ReferenceData, ReferenceSourceError>;

    /// Human readable description of where the data comes from.
    fn describe(&self) -> String;
}
