//! Category heuristics for symptom sets that match no known pattern.
//!
//! Each [`HeuristicRule`] describes an anatomical/system category by keyword
//! substrings. Categories are not mutually exclusive: one symptom may fall
//! into several of them.

use crate::core::error::DomainError;
use crate::core::symptom::{Symptom, SymptomSet};
use serde::Serialize;

/// A more specific label used instead of the generic category label when all
/// `requires` symptoms are present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicRefinement {
    pub requires: Vec<Symptom>,
    pub disease: String,
    pub confidence: f64,
}

/// Keyword-based category rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeuristicRule {
    category: String,
    keywords: Vec<String>,
    disease: String,
    specialist: String,
    confidence: f64,
    refinements: Vec<HeuristicRefinement>,
}

/// Result of applying one [`HeuristicRule`] to a symptom set
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicInference<'a> {
    pub category: &'a str,
    pub disease: &'a str,
    pub specialist: &'a str,
    pub confidence: f64,
    pub matched: Vec<Symptom>,
}

impl HeuristicRule {
    pub fn new<K, S>(
        category: impl Into<String>,
        keywords: K,
        disease: impl Into<String>,
        specialist: impl Into<String>,
        confidence: f64,
    ) -> Result<Self, DomainError>
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let category = category.into();
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.into().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(DomainError::InvalidConfiguration(format!(
                "heuristic category '{}' has no keywords",
                category
            )));
        }
        validate_confidence(&category, confidence)?;

        Ok(Self {
            category,
            keywords,
            disease: disease.into(),
            specialist: specialist.into(),
            confidence,
            refinements: Vec::new(),
        })
    }

    /// Add a refinement; refinements are tried in insertion order.
    pub fn with_refinement<I, S>(mut self, requires: I, disease: impl Into<String>, confidence: f64) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symptom>,
    {
        validate_confidence(&self.category, confidence)?;
        let requires: Vec<Symptom> = requires.into_iter().map(Into::into).collect();
        if requires.is_empty() {
            return Err(DomainError::InvalidConfiguration(format!(
                "refinement in heuristic category '{}' requires no symptoms",
                self.category
            )));
        }
        self.refinements.push(HeuristicRefinement {
            requires,
            disease: disease.into(),
            confidence,
        });
        Ok(self)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn disease(&self) -> &str {
        &self.disease
    }

    pub fn specialist(&self) -> &str {
        &self.specialist
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn refinements(&self) -> &[HeuristicRefinement] {
        &self.refinements
    }

    /// Keyword (substring) membership, case-insensitive
    pub fn matches(&self, symptom: &Symptom) -> bool {
        let lowered = symptom.as_str().to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Apply the rule; `None` when no symptom falls into this category.
    pub fn infer(&self, symptoms: &SymptomSet) -> Option<HeuristicInference<'_>> {
        let matched: Vec<Symptom> = symptoms.iter().filter(|s| self.matches(s)).cloned().collect();
        if matched.is_empty() {
            return None;
        }

        let refined = self
            .refinements
            .iter()
            .find(|r| r.requires.iter().all(|s| symptoms.contains(s.as_str())));

        let (disease, confidence) = match refined {
            Some(r) => (r.disease.as_str(), r.confidence),
            None => (self.disease.as_str(), self.confidence),
        };

        Some(HeuristicInference {
            category: &self.category,
            disease,
            specialist: &self.specialist,
            confidence,
            matched,
        })
    }
}

fn validate_confidence(category: &str, confidence: f64) -> Result<(), DomainError> {
    if confidence > 0.0 && confidence <= 1.0 {
        Ok(())
    } else {
        Err(DomainError::InvalidConfiguration(format!(
            "heuristic category '{}' has confidence {} outside (0, 1]",
            category, confidence
        )))
    }
}

/// First category whose keywords match the symptom, used for catalogue display
pub fn category_of<'a>(rules: &'a [HeuristicRule], symptom: &Symptom) -> Option<&'a str> {
    rules.iter().find(|r| r.matches(symptom)).map(HeuristicRule::category)
}
