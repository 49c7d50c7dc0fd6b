//! Combinatorial disease resolver
//!
//! Turns an unordered symptom set into ranked [`DiseaseCandidate`]s using a
//! three-tier fallback ladder:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Tier 1  EXACT      subsets of size min(n, 4) .. 2, largest   │
//! │                    first, looked up by canonical symptom set │
//! │            │ found 1..max-1                │ found 0         │
//! │            ▼                               ▼                 │
//! │ Tier 2  PARTIAL    overlap-ranked    Tier 3  HEURISTIC       │
//! │                    remaining patterns        keyword         │
//! │                                              categories      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Across all tiers a disease name appears at most once; the earliest tier
//! and most specific match wins.

use super::candidate::{DiseaseCandidate, MatchTier};
use crate::core::error::DomainError;
use crate::core::symptom::{Symptom, SymptomSet};
use crate::knowledge::{DiseasePattern, KnowledgeBase, PatternKey};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Upper bound on exact-tier subset size; enumeration is `C(n, k)` per size.
pub const MAX_COMBO_SIZE: usize = 4;

/// Tunable constants of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverParams {
    /// Largest symptom subset tried in the exact tier
    pub max_combo_size: usize,
    /// Multiplier applied to partial-match confidence
    pub partial_discount: f64,
    /// Upper bound on any candidate's confidence
    pub confidence_cap: f64,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            max_combo_size: MAX_COMBO_SIZE,
            partial_discount: 0.7,
            confidence_cap: 0.95,
        }
    }
}

impl ResolverParams {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(2..=MAX_COMBO_SIZE).contains(&self.max_combo_size) {
            return Err(DomainError::InvalidConfiguration(format!(
                "max_combo_size must be in 2..={}, got {}",
                MAX_COMBO_SIZE, self.max_combo_size
            )));
        }
        if !(self.partial_discount > 0.0 && self.partial_discount <= 1.0) {
            return Err(DomainError::InvalidConfiguration(format!(
                "partial_discount must be in (0, 1], got {}",
                self.partial_discount
            )));
        }
        if !(self.confidence_cap > 0.0 && self.confidence_cap <= 1.0) {
            return Err(DomainError::InvalidConfiguration(format!(
                "confidence_cap must be in (0, 1], got {}",
                self.confidence_cap
            )));
        }
        Ok(())
    }
}

/// Resolves symptom sets against a borrowed [`KnowledgeBase`].
///
/// Pure: the same knowledge base and input always yield the same ordered
/// output, and nothing is mutated.
#[derive(Debug, Clone, Copy)]
pub struct CombinatorialDiseaseResolver<'kb> {
    knowledge: &'kb KnowledgeBase,
    params: ResolverParams,
}

/// Per-call accumulator
struct Resolution<'kb> {
    knowledge: &'kb KnowledgeBase,
    cap: f64,
    found: Vec<DiseaseCandidate>,
    used_diseases: HashSet<String>,
    consumed_patterns: HashSet<usize>,
}

impl<'kb> Resolution<'kb> {
    fn new(knowledge: &'kb KnowledgeBase, cap: f64) -> Self {
        Self {
            knowledge,
            cap,
            found: Vec::new(),
            used_diseases: HashSet::new(),
            consumed_patterns: HashSet::new(),
        }
    }

    fn push(&mut self, disease: &str, confidence: f64, specialist: &str, matched: Vec<Symptom>, tier: MatchTier) -> bool {
        if !self.used_diseases.insert(disease.to_string()) {
            return false;
        }
        self.found.push(DiseaseCandidate {
            disease: disease.to_string(),
            confidence: confidence.min(self.cap),
            specialist: specialist.to_string(),
            matched_symptoms: matched,
            tier,
        });
        true
    }

    fn push_pattern(&mut self, pattern: &DiseasePattern, confidence: f64, matched: Vec<Symptom>, tier: MatchTier) -> bool {
        let specialist = self.knowledge.specialist_for(pattern.disease());
        self.push(pattern.disease(), confidence, specialist, matched, tier)
    }
}

struct PartialMatch<'a> {
    pattern: &'a DiseasePattern,
    matched: Vec<Symptom>,
    confidence: f64,
    relevance: f64,
}

impl<'kb> CombinatorialDiseaseResolver<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase) -> Self {
        Self {
            knowledge,
            params: ResolverParams::default(),
        }
    }

    pub fn with_params(mut self, params: ResolverParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    /// Rank disease candidates for `active`, at most `max_results` of them.
    ///
    /// Empty input yields an empty list. Symptoms unknown to the knowledge
    /// base are ignored.
    pub fn resolve(&self, active: &SymptomSet, max_results: usize) -> Vec<DiseaseCandidate> {
        if active.is_empty() || max_results == 0 {
            return Vec::new();
        }

        let mut resolution = Resolution::new(self.knowledge, self.params.confidence_cap);

        self.exact_tier(active, max_results, &mut resolution);
        if resolution.found.len() >= max_results {
            return resolution.found;
        }

        if resolution.found.is_empty() {
            self.heuristic_tier(active, max_results, &mut resolution);
        } else {
            self.partial_tier(active, max_results, &mut resolution);
        }

        resolution.found
    }

    /// Tier 1: largest subsets first; stops once `max_results` diseases are found.
    fn exact_tier(&self, active: &SymptomSet, max_results: usize, resolution: &mut Resolution<'_>) {
        let largest = active.len().min(self.params.max_combo_size.min(MAX_COMBO_SIZE));
        if largest < 2 {
            return;
        }

        for size in (2..=largest).rev() {
            for combo in active.iter().combinations(size) {
                let key = PatternKey::from_unordered(combo.iter().copied());
                let Some((index, pattern)) = self.knowledge.lookup(&key) else {
                    continue;
                };
                if resolution.consumed_patterns.contains(&index) {
                    continue;
                }

                let matched: Vec<Symptom> = combo.into_iter().cloned().collect();
                if resolution.push_pattern(pattern, pattern.base_confidence(), matched, MatchTier::Exact) {
                    resolution.consumed_patterns.insert(index);
                    debug!(
                        "Exact match #{} (size {}): {}",
                        resolution.found.len(),
                        size,
                        pattern.disease()
                    );
                    if resolution.found.len() >= max_results {
                        return;
                    }
                } else {
                    trace!("Skipping {}: already matched by a more specific subset", pattern.disease());
                }
            }
        }
    }

    /// Tier 2: fill remaining slots with overlap-ranked patterns.
    fn partial_tier(&self, active: &SymptomSet, max_results: usize, resolution: &mut Resolution<'_>) {
        let mut matches: Vec<PartialMatch<'_>> = self
            .knowledge
            .patterns()
            .iter()
            .enumerate()
            .filter(|(index, _)| !resolution.consumed_patterns.contains(index))
            .filter(|(_, pattern)| !resolution.used_diseases.contains(pattern.disease()))
            .filter_map(|(_, pattern)| {
                let matched: Vec<Symptom> = active.intersection(pattern.symptoms()).cloned().collect();
                if matched.is_empty() {
                    return None;
                }
                let overlap = matched.len() as f64;
                let ratio = overlap / pattern.len() as f64;
                Some(PartialMatch {
                    pattern,
                    confidence: pattern.base_confidence() * ratio * self.params.partial_discount,
                    relevance: overlap * ratio * pattern.base_confidence(),
                    matched,
                })
            })
            .collect();

        // Stable sort: equal relevance keeps registration order.
        matches.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

        for candidate in matches {
            if resolution.found.len() >= max_results {
                break;
            }
            let relevance = candidate.relevance;
            if resolution.push_pattern(candidate.pattern, candidate.confidence, candidate.matched, MatchTier::Partial) {
                debug!(
                    "Partial match #{}: {} (relevance {:.3})",
                    resolution.found.len(),
                    candidate.pattern.disease(),
                    relevance
                );
            }
        }
    }

    /// Tier 3: one synthetic candidate per matching keyword category.
    fn heuristic_tier(&self, active: &SymptomSet, max_results: usize, resolution: &mut Resolution<'_>) {
        let mut inferences: Vec<_> = self
            .knowledge
            .heuristics()
            .iter()
            .filter_map(|rule| rule.infer(active))
            .collect();

        inferences.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        for inference in inferences {
            if resolution.found.len() >= max_results {
                break;
            }
            debug!(
                "Inferred {} from {} category ({} symptoms)",
                inference.disease,
                inference.category,
                inference.matched.len()
            );
            resolution.push(
                inference.disease,
                inference.confidence,
                inference.specialist,
                inference.matched,
                MatchTier::Heuristic,
            );
        }
    }
}
