//! Disease candidates produced by the resolver

use crate::core::symptom::Symptom;
use serde::{Deserialize, Serialize};

/// Provenance/quality class of a candidate.
///
/// Variants are declared in priority order: `Exact` ranks above `Partial`,
/// which ranks above `Heuristic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchTier {
    /// A subset of the reported symptoms is exactly a known pattern
    Exact,
    /// A known pattern shares at least one symptom with the report
    Partial,
    /// Inferred from symptom category keywords
    Heuristic,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "EXACT",
            MatchTier::Partial => "PARTIAL",
            MatchTier::Heuristic => "HEURISTIC",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A ranked disease hypothesis for one resolution call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseCandidate {
    pub disease: String,
    /// Never above the resolver's confidence cap
    pub confidence: f64,
    pub specialist: String,
    /// The subset of the reported symptoms that justified this candidate
    pub matched_symptoms: Vec<Symptom>,
    pub tier: MatchTier,
}
