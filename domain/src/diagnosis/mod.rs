//! Disease diagnosis domain
//!
//! Tiered combinatorial resolution of symptom sets into ranked
//! [`DiseaseCandidate`]s. See [`CombinatorialDiseaseResolver`] for the
//! EXACT → PARTIAL → HEURISTIC ladder.

pub mod candidate;
pub mod resolver;

pub use candidate::{DiseaseCandidate, MatchTier};
pub use resolver::{CombinatorialDiseaseResolver, MAX_COMBO_SIZE, ResolverParams};
