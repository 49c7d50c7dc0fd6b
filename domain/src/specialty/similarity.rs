//! Binary-vector similarity between a patient and a historical case.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set sizes needed by every similarity measure over binary vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub intersection: usize,
    pub active: usize,
    pub case: usize,
}

impl Overlap {
    pub fn of<T: Ord>(active: &BTreeSet<T>, case: &BTreeSet<T>) -> Self {
        Self {
            intersection: active.intersection(case).count(),
            active: active.len(),
            case: case.len(),
        }
    }

    pub fn union(&self) -> usize {
        self.active + self.case - self.intersection
    }

    /// `|A ∩ B| / |A ∪ B|`
    pub fn jaccard(&self) -> f64 {
        match self.union() {
            0 => 0.0,
            union => self.intersection as f64 / union as f64,
        }
    }

    /// `A·B / (‖A‖‖B‖)`; for binary vectors the norms are `sqrt(|A|)`, `sqrt(|B|)`.
    pub fn cosine(&self) -> f64 {
        let norms = (self.active as f64).sqrt() * (self.case as f64).sqrt();
        if norms > 0.0 {
            self.intersection as f64 / norms
        } else {
            0.0
        }
    }

    /// Fraction of the patient's symptoms explained by the case
    pub fn simple_match(&self) -> f64 {
        match self.active {
            0 => 0.0,
            active => self.intersection as f64 / active as f64,
        }
    }
}

/// Blend weights for the three similarity measures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityWeights {
    pub jaccard: f64,
    pub cosine: f64,
    pub simple_match: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            jaccard: 0.2,
            cosine: 0.2,
            simple_match: 0.6,
        }
    }
}

impl SimilarityWeights {
    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [self.jaccard, self.cosine, self.simple_match];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(DomainError::InvalidConfiguration(format!(
                "similarity weights must be non-negative, got {:?}",
                weights
            )));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(DomainError::InvalidConfiguration(
                "similarity weights must sum to a positive value".to_string(),
            ));
        }
        Ok(())
    }

    /// Weighted blend of the three measures
    pub fn combine(&self, overlap: &Overlap) -> f64 {
        self.jaccard * overlap.jaccard() + self.cosine * overlap.cosine() + self.simple_match * overlap.simple_match()
    }
}
