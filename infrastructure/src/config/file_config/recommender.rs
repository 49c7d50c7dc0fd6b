//! Recommender configuration from TOML (`[recommender]` section)

use serde::{Deserialize, Serialize};
use triage_domain::config::validation::{ConfigIssue, ConfigIssueCode};
use triage_domain::{RecommenderParams, SimilarityWeights};

/// Specialist recommender configuration from TOML.
///
/// The similarity weights are flattened into this section rather than a
/// nested table.
///
/// # Example
///
/// ```toml
/// [recommender]
/// top_n = 5
/// base_confidence = 30.0
/// min_fallback_confidence = 20.0
/// simple_match_weight = 0.6
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRecommenderConfig {
    /// Default number of specialists returned
    pub top_n: usize,
    pub base_confidence: f64,
    pub min_fallback_confidence: f64,
    pub fallback_step: f64,
    pub min_scored_specialists: usize,
    pub fuzzy_threshold: f64,
    pub jaccard_weight: f64,
    pub cosine_weight: f64,
    pub simple_match_weight: f64,
    /// Number of valid symptom names shown on a no-match failure
    pub no_match_sample: usize,
}

impl Default for FileRecommenderConfig {
    fn default() -> Self {
        let params = RecommenderParams::default();
        Self {
            top_n: 5,
            base_confidence: params.base_confidence,
            min_fallback_confidence: params.min_fallback_confidence,
            fallback_step: params.fallback_step,
            min_scored_specialists: params.min_scored_specialists,
            fuzzy_threshold: params.fuzzy_threshold,
            jaccard_weight: params.weights.jaccard,
            cosine_weight: params.weights.cosine,
            simple_match_weight: params.weights.simple_match,
            no_match_sample: params.no_match_sample,
        }
    }
}

impl FileRecommenderConfig {
    pub fn weights(&self) -> SimilarityWeights {
        SimilarityWeights {
            jaccard: self.jaccard_weight,
            cosine: self.cosine_weight,
            simple_match: self.simple_match_weight,
        }
    }

    pub fn to_params(&self) -> RecommenderParams {
        RecommenderParams {
            base_confidence: self.base_confidence,
            min_fallback_confidence: self.min_fallback_confidence,
            fallback_step: self.fallback_step,
            min_scored_specialists: self.min_scored_specialists,
            fuzzy_threshold: self.fuzzy_threshold,
            weights: self.weights(),
            no_match_sample: self.no_match_sample,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.top_n == 0 {
            issues.push(out_of_range("recommender.top_n", "must be at least 1".to_string()));
        }
        for (field, value) in [
            ("recommender.base_confidence", self.base_confidence),
            ("recommender.min_fallback_confidence", self.min_fallback_confidence),
        ] {
            if !(0.0..=100.0).contains(&value) {
                issues.push(out_of_range(field, format!("must be within 0-100, got {}", value)));
            }
        }
        if self.fallback_step < 0.0 {
            issues.push(out_of_range(
                "recommender.fallback_step",
                format!("must be non-negative, got {}", self.fallback_step),
            ));
        }
        if !(0.0..1.0).contains(&self.fuzzy_threshold) {
            issues.push(out_of_range(
                "recommender.fuzzy_threshold",
                format!("must be within [0, 1), got {}", self.fuzzy_threshold),
            ));
        }

        let weights = [self.jaccard_weight, self.cosine_weight, self.simple_match_weight];
        let sum: f64 = weights.iter().sum();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || sum <= 0.0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidWeights,
                format!(
                    "recommender: similarity weights must be non-negative and sum to a positive value, got {:?}",
                    weights
                ),
            ));
        } else if (sum - 1.0).abs() > 1e-9 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidWeights,
                format!(
                    "recommender: similarity weights sum to {}, scores will not be on a 0-100 scale",
                    sum
                ),
            ));
        }

        if self.min_fallback_confidence > self.base_confidence {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::FallbackAboveBase,
                format!(
                    "recommender: min_fallback_confidence ({}) is above base_confidence ({}), the threshold is never lowered",
                    self.min_fallback_confidence, self.base_confidence
                ),
            ));
        }

        issues
    }
}

fn out_of_range(field: &str, detail: String) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
        },
        format!("{}: {}", field, detail),
    )
}
