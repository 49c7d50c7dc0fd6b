//! Core domain concepts shared across all subdomains.
//!
//! - [`symptom::Symptom`] / [`symptom::SymptomSet`]: canonical symptom identifiers
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod symptom;
