//! Dataset compiled into the binary

use super::schema::{Document, assemble};
use tracing::debug;
use triage_application::{ReferenceData, ReferenceSource, ReferenceSourceError};

pub(crate) const KNOWLEDGE_BASE: &str = include_str!("../../data/knowledge_base.toml");
pub(crate) const CASE_DATABASE: &str = include_str!("../../data/case_database.toml");

pub(crate) fn knowledge_base_document() -> Document {
    Document::embedded(KNOWLEDGE_BASE, "embedded knowledge_base.toml")
}

pub(crate) fn case_database_document() -> Document {
    Document::embedded(CASE_DATABASE, "embedded case_database.toml")
}

/// Reference source backed by the default dataset shipped with the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedReferenceSource;

impl EmbeddedReferenceSource {
    pub fn new() -> Self {
        Self
    }
}

impl ReferenceSource for EmbeddedReferenceSource {
    fn load(&self) -> Result<ReferenceData, ReferenceSourceError> {
        let data = assemble(&knowledge_base_document(), &case_database_document())?;
        debug!(
            "Loaded embedded reference data '{}' ({} patterns, {} cases)",
            data.version(),
            data.knowledge.len(),
            data.cases.len()
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        "embedded default dataset".to_string()
    }
}

/// Checks against the shipped dataset, end to end through the use cases.
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use triage_application::{
        AssessSymptomsInput, AssessSymptomsUseCase, EngineConfig, ListSymptomsUseCase,
        RecommendSpecialistsError, RecommendSpecialistsInput, RecommendSpecialistsUseCase,
        ReferenceStore, ResolveDiseasesInput, ResolveDiseasesUseCase,
    };
    use triage_domain::MatchTier;

    fn store() -> Arc<ReferenceStore> {
        Arc::new(ReferenceStore::from_source(Arc::new(EmbeddedReferenceSource::new())).unwrap())
    }

    fn resolve(symptoms: &[&str]) -> Vec<triage_domain::DiseaseCandidate> {
        ResolveDiseasesUseCase::new(store(), EngineConfig::default())
            .execute(ResolveDiseasesInput::new(symptoms.iter().copied()))
            .candidates
    }

    #[test]
    fn test_embedded_dataset_loads() {
        let data = EmbeddedReferenceSource::new().load().unwrap();
        assert!(!data.knowledge.is_empty());
        assert!(!data.cases.is_empty());
        assert!(data.knowledge.heuristics().len() >= 6);
    }

    #[test]
    fn test_cholera_scenario() {
        let candidates = resolve(&["diarrhoea", "vomiting", "dehydration"]);
        assert_eq!(candidates[0].disease, "Cholera");
        assert_eq!(candidates[0].tier, MatchTier::Exact);
        assert_eq!(candidates[0].confidence, 0.75);
        assert_eq!(candidates[0].specialist, "Gastroenterology");
    }

    #[test]
    fn test_severe_dental_abscess_scenario() {
        let candidates = resolve(&["toothache", "jaw_pain", "facial_swelling"]);
        assert_eq!(candidates[0].disease, "Severe Dental Abscess");
        assert!(candidates[0].confidence >= 0.9);
        assert_eq!(candidates[0].specialist, "Emergency Dentistry");
        assert_eq!(candidates[0].tier, MatchTier::Exact);
    }

    #[test]
    fn test_unknown_symptom_scenario() {
        assert!(resolve(&["unknown_symptom_1"]).is_empty());

        let error = RecommendSpecialistsUseCase::new(store(), EngineConfig::default())
            .execute(RecommendSpecialistsInput::new(["unknown_symptom_1"]))
            .unwrap_err();
        assert!(matches!(error, RecommendSpecialistsError::NoMatch { .. }));
        assert!(!error.available_symptoms().is_empty());
        assert!(error.available_symptoms().len() <= 20);
    }

    #[test]
    fn test_joint_pain_heuristic_scenario() {
        let candidates = resolve(&["joint_pain"]);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].tier, MatchTier::Heuristic);
        assert_eq!(candidates[0].disease, "Musculoskeletal Condition");
        assert!((0.6..=0.8).contains(&candidates[0].confidence));
    }

    #[test]
    fn test_exact_pattern_is_top_candidate() {
        let data = EmbeddedReferenceSource::new().load().unwrap();
        for pattern in data.knowledge.patterns().iter().filter(|p| p.len() >= 2) {
            let symptoms: Vec<&str> = pattern.symptoms().iter().map(|s| s.as_str()).collect();
            let candidates = resolve(&symptoms);
            assert_eq!(candidates[0].tier, MatchTier::Exact, "{:?}", symptoms);
            if pattern.len() <= 4 {
                assert_eq!(candidates[0].disease, pattern.disease(), "{:?}", symptoms);
                assert_eq!(candidates[0].confidence, pattern.base_confidence());
            }
        }
    }

    #[test]
    fn test_no_duplicate_diseases_and_tier_order() {
        let inputs: &[&[&str]] = &[
            &["fever", "chills", "headache", "muscle_aches", "nausea"],
            &["cough", "fever", "shortness_of_breath", "chest_pain"],
            &["toothache", "tooth_sensitivity", "bad_breath"],
            &["skin_rash", "itching", "fever"],
            &["stomach_pain", "nausea", "vomiting", "diarrhea"],
        ];
        for input in inputs {
            let candidates = resolve(input);
            let names: HashSet<_> = candidates.iter().map(|c| c.disease.as_str()).collect();
            assert_eq!(names.len(), candidates.len(), "{:?}", input);
            assert!(candidates.windows(2).all(|w| w[0].tier <= w[1].tier), "{:?}", input);
            assert!(candidates.len() <= 3);
        }
    }

    #[test]
    fn test_recommendation_invariants() {
        let output = RecommendSpecialistsUseCase::new(store(), EngineConfig::default())
            .execute(RecommendSpecialistsInput::new(["joint pain", "stiffness", "knee_pain"]))
            .unwrap();
        assert_eq!(output.view.recommendations[0].specialist, "Rheumatology");
        assert!(
            output
                .recommendation
                .recommendations
                .iter()
                .all(|s| s.matching_cases <= s.total_cases)
        );
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let use_case = AssessSymptomsUseCase::new(store(), EngineConfig::default());
        let input = AssessSymptomsInput::new(["cough", "fever", "headache"]);
        let first = serde_json::to_value(use_case.execute(input.clone()).unwrap()).unwrap();
        let second = serde_json::to_value(use_case.execute(input).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_catalogue_categories() {
        let entries = ListSymptomsUseCase::new(store()).execute();
        let category = |id: &str| {
            entries
                .iter()
                .find(|e| e.id.as_str() == id)
                .map(|e| e.category.clone())
                .unwrap()
        };
        assert_eq!(category("skin_rash"), "Dermatological");
        assert_eq!(category("toothache"), "Dental");
        assert_eq!(category("joint_pain"), "Musculoskeletal");
        assert_eq!(category("fever"), "Other");
    }
}
