//! Knowledge base domain
//!
//! Static reference data for disease resolution:
//!
//! - [`DiseasePattern`]: symptom set → disease with a base confidence
//! - [`KnowledgeBase`]: set-keyed pattern index plus disease → specialist table
//! - [`HeuristicRule`]: keyword categories used when no pattern matches

pub mod base;
pub mod heuristic;
pub mod pattern;

pub use base::{DEFAULT_SPECIALIST, KnowledgeBase, KnowledgeBaseBuilder};
pub use heuristic::{HeuristicInference, HeuristicRefinement, HeuristicRule, category_of};
pub use pattern::{DiseasePattern, PatternKey};
