//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod assess_symptoms;
pub mod list_symptoms;
pub mod recommend_specialists;
pub mod resolve_diseases;
