//! Disease patterns

use crate::core::error::DomainError;
use crate::core::symptom::Symptom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// "This exact combination of symptoms implies this disease with this base
/// confidence."
///
/// The symptom set is stored sorted, so two patterns listing the same
/// symptoms in different orders share one [`PatternKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseasePattern {
    symptoms: BTreeSet<Symptom>,
    disease: String,
    base_confidence: f64,
}

impl DiseasePattern {
    /// Create a validated pattern.
    ///
    /// Fails if the symptom set is empty, the disease name is blank, or the
    /// confidence is outside `(0, 1]`.
    pub fn new<I, S>(symptoms: I, disease: impl Into<String>, base_confidence: f64) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symptom>,
    {
        let symptoms: BTreeSet<Symptom> = symptoms.into_iter().map(Into::into).collect();
        let disease = disease.into();

        if symptoms.is_empty() {
            return Err(DomainError::InvalidPattern(format!(
                "pattern for '{}' has no symptoms",
                disease
            )));
        }
        if disease.trim().is_empty() {
            return Err(DomainError::InvalidPattern(
                "pattern has an empty disease name".to_string(),
            ));
        }
        if !(base_confidence > 0.0 && base_confidence <= 1.0) {
            return Err(DomainError::InvalidPattern(format!(
                "confidence {} for '{}' is outside (0, 1]",
                base_confidence, disease
            )));
        }

        Ok(Self {
            symptoms,
            disease,
            base_confidence,
        })
    }

    pub fn symptoms(&self) -> &BTreeSet<Symptom> {
        &self.symptoms
    }

    pub fn disease(&self) -> &str {
        &self.disease
    }

    pub fn base_confidence(&self) -> f64 {
        self.base_confidence
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn key(&self) -> PatternKey {
        PatternKey(self.symptoms.iter().cloned().collect())
    }
}

/// Set-keyed lookup key: the sorted symptom list of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternKey(Vec<Symptom>);

impl PatternKey {
    /// Build a key from symptoms in any order
    pub fn from_unordered<'a, I>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = &'a Symptom>,
    {
        let mut sorted: Vec<Symptom> = symptoms.into_iter().cloned().collect();
        sorted.sort();
        sorted.dedup();
        Self(sorted)
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.0
    }
}
