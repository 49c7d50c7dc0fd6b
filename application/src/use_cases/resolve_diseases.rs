//! Resolve Diseases use case.
//!
//! Normalises raw symptom tokens and runs the combinatorial resolver
//! against the current knowledge base snapshot.

use crate::config::EngineConfig;
use crate::reference::ReferenceStore;
use crate::response::{DiagnosisView, ResultAssembler};
use std::sync::Arc;
use tracing::{debug, info};
use triage_domain::{CombinatorialDiseaseResolver, DiseaseCandidate, SymptomSet};

/// Input for the [`ResolveDiseasesUseCase`].
#[derive(Debug, Clone)]
pub struct ResolveDiseasesInput {
    /// Raw symptom tokens
    pub symptoms: Vec<String>,
    /// Overrides the configured `max_results`
    pub max_results: Option<usize>,
}

impl ResolveDiseasesInput {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            max_results: None,
        }
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ResolveDiseasesOutput {
    pub active_symptoms: SymptomSet,
    pub candidates: Vec<DiseaseCandidate>,
    pub diagnoses: Vec<DiagnosisView>,
    pub knowledge_version: String,
}

/// Use case for ranking disease candidates.
///
/// Never fails: empty input and unknown symptoms yield an empty list.
#[derive(Debug, Clone)]
pub struct ResolveDiseasesUseCase {
    store: Arc<ReferenceStore>,
    config: EngineConfig,
}

impl ResolveDiseasesUseCase {
    pub fn new(store: Arc<ReferenceStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn execute(&self, input: ResolveDiseasesInput) -> ResolveDiseasesOutput {
        let data = self.store.snapshot();
        let active = data.normalizer.normalize_all(&input.symptoms);
        let max_results = input.max_results.unwrap_or(self.config.max_results);

        debug!("Resolving {} symptoms (max {})", active.len(), max_results);

        let candidates = CombinatorialDiseaseResolver::new(&data.knowledge)
            .with_params(self.config.resolver)
            .resolve(&active, max_results);

        info!("Resolved {} disease candidates", candidates.len());

        let diagnoses = ResultAssembler::new(self.config.recommender.base_confidence).diagnoses(&candidates);
        ResolveDiseasesOutput {
            active_symptoms: active,
            candidates,
            diagnoses,
            knowledge_version: data.version().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::test_support::reference_data;
    use triage_domain::MatchTier;

    fn use_case() -> ResolveDiseasesUseCase {
        let store = Arc::new(ReferenceStore::new(reference_data("test")));
        ResolveDiseasesUseCase::new(store, EngineConfig::default())
    }

    #[test]
    fn test_normalises_before_resolving() {
        let output = use_case().execute(ResolveDiseasesInput::new(["Diarrhoea", "vomiting_severe", "dehydration"]));
        assert_eq!(output.candidates[0].disease, "Cholera");
        assert_eq!(output.candidates[0].tier, MatchTier::Exact);
        assert_eq!(output.diagnoses[0].specialist, "Gastroenterology");
        assert_eq!(output.knowledge_version, "test");
    }

    #[test]
    fn test_empty_input_is_empty_result() {
        let empty: [&str; 0] = [];
        let output = use_case().execute(ResolveDiseasesInput::new(empty));
        assert!(output.candidates.is_empty());
        assert!(output.active_symptoms.is_empty());
    }

    #[test]
    fn test_max_results_override() {
        let output = use_case().execute(ResolveDiseasesInput::new(["cough", "fever"]).with_max_results(1));
        assert_eq!(output.candidates.len(), 1);
        assert_eq!(output.candidates[0].disease, "Common Cold");
    }
}
