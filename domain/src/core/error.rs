//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("No symptoms provided")]
    EmptyInput,

    #[error("No matching symptoms found ({} known symptoms available)", available.len())]
    NoMatch {
        /// Sample of valid symptom identifiers, for diagnostic display
        available: Vec<String>,
    },

    #[error("Invalid disease pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid specialty case: {0}")]
    InvalidCase(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl DomainError {
    /// Check if this error is a data-coverage gap rather than a caller error
    pub fn is_no_match(&self) -> bool {
        matches!(self, DomainError::NoMatch { .. })
    }

    /// Sample of valid symptom names carried by a [`DomainError::NoMatch`]
    pub fn available_symptoms(&self) -> &[String] {
        match self {
            DomainError::NoMatch { available } => available,
            _ => &[],
        }
    }
}
