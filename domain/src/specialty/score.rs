//! Per-specialist scoring results

use serde::{Deserialize, Serialize};

/// Aggregated similarity of one specialist cohort to the patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialtyScore {
    pub specialist: String,
    /// Mean nonzero similarity, as a percentage (0-100)
    pub confidence_mean: f64,
    /// Cases with nonzero similarity; never above `total_cases`
    pub matching_cases: usize,
    pub total_cases: usize,
    pub max_similarity: f64,
}

impl SpecialtyScore {
    /// Share of the cohort with nonzero similarity, as a percentage
    pub fn match_percentage(&self) -> f64 {
        if self.total_cases == 0 {
            return 0.0;
        }
        self.matching_cases as f64 / self.total_cases as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Moderate,
}

impl ConfidenceLevel {
    /// `High` at or above the base confidence, otherwise `Moderate`
    pub fn classify(confidence: f64, base_confidence: f64) -> Self {
        if confidence >= base_confidence {
            ConfidenceLevel::High
        } else {
            ConfidenceLevel::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Moderate => "Moderate",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
