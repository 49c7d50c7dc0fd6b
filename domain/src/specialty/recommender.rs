//! Case-similarity specialist recommender
//!
//! Scores every specialist cohort of a [`CaseDatabase`] against the
//! patient's symptoms, then filters by a dynamic confidence threshold:
//!
//! ```text
//! tokens ──► ColumnMatcher ──► active column set
//!                                   │
//!                   per cohort: weighted similarity per case
//!                   (zero-similarity cases dropped)
//!                                   │
//!           mean×100, count, max ──► SpecialtyScore
//!                                   │
//!   threshold = base, or max(min_fallback, base - step) when fewer than
//!   `min_scored_specialists` cohorts scored
//!                                   │
//!           sort desc ─► ≥ threshold ─► distinct ─► top N
//! ```

use super::case::CaseDatabase;
use super::matcher::ColumnMatcher;
use super::score::SpecialtyScore;
use super::similarity::{Overlap, SimilarityWeights};
use crate::core::error::DomainError;
use crate::core::symptom::{Symptom, SymptomSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Tunable constants of the recommender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecommenderParams {
    /// Default acceptance threshold, in percent
    pub base_confidence: f64,
    /// Floor of the lowered threshold, in percent
    pub min_fallback_confidence: f64,
    /// How far the threshold drops when few specialists scored
    pub fallback_step: f64,
    /// Below this many scored specialists the threshold is lowered
    pub min_scored_specialists: usize,
    /// Minimum token-set Jaccard for a fuzzy column match (exclusive)
    pub fuzzy_threshold: f64,
    pub weights: SimilarityWeights,
    /// Number of valid column keys reported on a no-match failure
    pub no_match_sample: usize,
}

impl Default for RecommenderParams {
    fn default() -> Self {
        Self {
            base_confidence: 30.0,
            min_fallback_confidence: 20.0,
            fallback_step: 10.0,
            min_scored_specialists: 3,
            fuzzy_threshold: 0.4,
            weights: SimilarityWeights::default(),
            no_match_sample: 20,
        }
    }
}

impl RecommenderParams {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.weights.validate()?;
        for (name, value) in [
            ("base_confidence", self.base_confidence),
            ("min_fallback_confidence", self.min_fallback_confidence),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(DomainError::InvalidConfiguration(format!(
                    "{} must be within 0-100, got {}",
                    name, value
                )));
            }
        }
        if self.fallback_step < 0.0 {
            return Err(DomainError::InvalidConfiguration(format!(
                "fallback_step must be non-negative, got {}",
                self.fallback_step
            )));
        }
        if !(0.0..1.0).contains(&self.fuzzy_threshold) {
            return Err(DomainError::InvalidConfiguration(format!(
                "fuzzy_threshold must be within [0, 1), got {}",
                self.fuzzy_threshold
            )));
        }
        Ok(())
    }

    /// Acceptance threshold given how many specialists produced a score
    pub fn confidence_threshold(&self, scored_specialists: usize) -> f64 {
        if scored_specialists < self.min_scored_specialists {
            self.min_fallback_confidence
                .max(self.base_confidence - self.fallback_step)
        } else {
            self.base_confidence
        }
    }
}

/// Result of one recommendation call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Case-database columns the input mapped onto, in input order
    pub matched_symptoms: Vec<Symptom>,
    pub recommendations: Vec<SpecialtyScore>,
    pub confidence_threshold: f64,
    pub total_specialists_considered: usize,
}

/// Sort by confidence (stable), keep those at or above `threshold`,
/// drop repeated specialists, and truncate to `top_n`.
pub fn select_recommendations(scores: &[SpecialtyScore], threshold: f64, top_n: usize) -> Vec<SpecialtyScore> {
    let mut ranked: Vec<&SpecialtyScore> = scores.iter().collect();
    ranked.sort_by(|a, b| b.confidence_mean.total_cmp(&a.confidence_mean));

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|score| score.confidence_mean >= threshold)
        .filter(|&score| seen.insert(score.specialist.as_str()))
        .take(top_n)
        .cloned()
        .collect()
}

/// Scores specialists against a borrowed [`CaseDatabase`].
#[derive(Debug, Clone, Copy)]
pub struct CaseSimilarityRecommender<'db> {
    cases: &'db CaseDatabase,
    params: RecommenderParams,
}

impl<'db> CaseSimilarityRecommender<'db> {
    pub fn new(cases: &'db CaseDatabase) -> Self {
        Self {
            cases,
            params: RecommenderParams::default(),
        }
    }

    pub fn with_params(mut self, params: RecommenderParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &RecommenderParams {
        &self.params
    }

    /// Recommend up to `top_n` specialists.
    ///
    /// Fails with [`DomainError::EmptyInput`] for an empty set and with
    /// [`DomainError::NoMatch`] when no symptom maps onto any column. An
    /// empty recommendation list after thresholding is not an error.
    pub fn recommend(&self, symptoms: &SymptomSet, top_n: usize) -> Result<Recommendation, DomainError> {
        if symptoms.is_empty() {
            return Err(DomainError::EmptyInput);
        }

        let (matched, active) = self.match_symptoms(symptoms);
        if active.is_empty() {
            return Err(DomainError::NoMatch {
                available: self
                    .cases
                    .keys()
                    .iter()
                    .take(self.params.no_match_sample)
                    .cloned()
                    .collect(),
            });
        }

        let scores = self.score_cohorts(&active);
        let threshold = self.params.confidence_threshold(scores.len());
        let recommendations = select_recommendations(&scores, threshold, top_n);

        debug!(
            "{} of {} scored specialists pass threshold {:.1}",
            recommendations.len(),
            scores.len(),
            threshold
        );

        Ok(Recommendation {
            matched_symptoms: matched,
            recommendations,
            confidence_threshold: threshold,
            total_specialists_considered: scores.len(),
        })
    }

    /// Map input symptoms to columns; unmatched tokens are dropped.
    fn match_symptoms(&self, symptoms: &SymptomSet) -> (Vec<Symptom>, BTreeSet<usize>) {
        let matcher = ColumnMatcher::new(self.cases, self.params.fuzzy_threshold);
        let mut matched = Vec::new();
        let mut active = BTreeSet::new();

        for symptom in symptoms {
            match matcher.match_token(symptom.as_str()) {
                Some(found) => {
                    let column = found.column();
                    if active.insert(column) {
                        if let Some(name) = self.cases.column(column) {
                            matched.push(name.clone());
                        }
                    }
                }
                None => warn!("Dropping unmatched symptom '{}'", symptom),
            }
        }

        (matched, active)
    }

    /// One score per cohort with at least one nonzero-similarity case,
    /// in cohort order.
    pub fn score_cohorts(&self, active: &BTreeSet<usize>) -> Vec<SpecialtyScore> {
        let weights = self.params.weights;
        self.cases
            .cohorts()
            .iter()
            .filter_map(|cohort| {
                let similarities: Vec<f64> = cohort
                    .vectors
                    .iter()
                    .map(|case| weights.combine(&Overlap::of(active, case)))
                    .filter(|similarity| *similarity > 0.0)
                    .collect();

                if similarities.is_empty() {
                    return None;
                }

                let mean = similarities.iter().sum::<f64>() / similarities.len() as f64;
                Some(SpecialtyScore {
                    specialist: cohort.specialist.clone(),
                    confidence_mean: mean * 100.0,
                    matching_cases: similarities.len(),
                    total_cases: cohort.len(),
                    max_similarity: similarities.iter().copied().fold(0.0, f64::max),
                })
            })
            .collect()
    }
}
