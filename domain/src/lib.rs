//! Domain layer for symptom-triage
//!
//! This crate contains the core matching and scoring logic, entities, and
//! value objects. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Disease resolution
//!
//! A [`CombinatorialDiseaseResolver`] maps a [`SymptomSet`] onto ranked
//! [`DiseaseCandidate`]s through an exact → partial → heuristic ladder
//! over an immutable [`KnowledgeBase`].
//!
//! ## Specialist recommendation
//!
//! A [`CaseSimilarityRecommender`] scores specialist cohorts of a
//! [`CaseDatabase`] by weighted set similarity, filtered by a dynamic
//! confidence threshold.
//!
//! Both are pure functions over borrowed reference data and can run
//! concurrently without coordination.

pub mod config;
pub mod core;
pub mod diagnosis;
pub mod knowledge;
pub mod normalize;
pub mod specialty;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    symptom::{Symptom, SymptomSet},
};
pub use diagnosis::{CombinatorialDiseaseResolver, DiseaseCandidate, MAX_COMBO_SIZE, MatchTier, ResolverParams};
pub use knowledge::{
    DEFAULT_SPECIALIST, DiseasePattern, HeuristicRule, KnowledgeBase, KnowledgeBaseBuilder, PatternKey,
};
pub use normalize::{SpecialistCanonicalizer, SymptomNormalizer};
pub use specialty::{
    CaseDatabase, CaseSimilarityRecommender, ConfidenceLevel, Recommendation, RecommenderParams,
    SimilarityWeights, SpecialtyCase, SpecialtyScore,
};
