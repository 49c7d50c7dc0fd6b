//! Result assembly: domain results → response views

use super::views::{AssessmentReport, DiagnosisView, RecommendationView, SpecialistView};
use triage_domain::util::round_to;
use triage_domain::{ConfidenceLevel, DiseaseCandidate, Recommendation, SymptomSet};

/// Specialist named when there is neither a diagnosis nor a recommendation
pub const FALLBACK_SPECIALIST: &str = "General Practitioner";

/// Builds the views for resolver and recommender output.
#[derive(Debug, Clone, Copy)]
pub struct ResultAssembler {
    base_confidence: f64,
}

impl ResultAssembler {
    /// `base_confidence` separates "High" from "Moderate" recommendations.
    pub fn new(base_confidence: f64) -> Self {
        Self { base_confidence }
    }

    pub fn explanation(rank: usize, candidate: &DiseaseCandidate) -> String {
        let likelihood = if rank == 0 { "likely" } else { "possible" };
        format!(
            "Based on your symptoms, {} is {}. Recommended specialist: {}",
            candidate.disease, likelihood, candidate.specialist
        )
    }

    pub fn diagnoses(&self, candidates: &[DiseaseCandidate]) -> Vec<DiagnosisView> {
        candidates
            .iter()
            .enumerate()
            .map(|(rank, candidate)| DiagnosisView {
                disease: candidate.disease.clone(),
                probability: candidate.confidence,
                specialist: candidate.specialist.clone(),
                confidence: candidate.confidence,
                matched_symptoms: candidate.matched_symptoms.clone(),
                explanation: Self::explanation(rank, candidate),
                tier: candidate.tier,
            })
            .collect()
    }

    pub fn recommendation(&self, recommendation: &Recommendation) -> RecommendationView {
        RecommendationView {
            matched_symptoms: recommendation.matched_symptoms.clone(),
            recommendations: recommendation
                .recommendations
                .iter()
                .map(|score| SpecialistView {
                    specialist: score.specialist.clone(),
                    confidence: round_to(score.confidence_mean, 1),
                    matching_cases: score.matching_cases,
                    total_cases: score.total_cases,
                    match_percentage: round_to(score.match_percentage(), 1),
                    max_similarity: round_to(score.max_similarity, 3),
                    confidence_level: ConfidenceLevel::classify(score.confidence_mean, self.base_confidence),
                })
                .collect(),
            confidence_threshold: recommendation.confidence_threshold,
            total_specialists_considered: recommendation.total_specialists_considered,
        }
    }

    /// Merge both components' output into one report.
    pub fn assessment(
        &self,
        active: &SymptomSet,
        candidates: &[DiseaseCandidate],
        recommendation: Option<&Recommendation>,
    ) -> AssessmentReport {
        let diagnoses = self.diagnoses(candidates);
        let specialists = recommendation.map(|r| self.recommendation(r));

        let mut disease_based_specialists: Vec<String> = Vec::new();
        for diagnosis in &diagnoses {
            if !disease_based_specialists.contains(&diagnosis.specialist) {
                disease_based_specialists.push(diagnosis.specialist.clone());
            }
        }

        let primary_specialist = diagnoses
            .first()
            .map(|d| d.specialist.clone())
            .or_else(|| {
                specialists
                    .as_ref()
                    .and_then(|s| s.recommendations.first())
                    .map(|s| s.specialist.clone())
            })
            .unwrap_or_else(|| FALLBACK_SPECIALIST.to_string());

        AssessmentReport {
            confidence: diagnoses.first().map(|d| d.confidence),
            suggested_diseases: diagnoses.iter().map(|d| d.disease.clone()).collect(),
            primary_specialist,
            disease_based_specialists,
            specialists,
            active_symptoms: active.iter().cloned().collect(),
            diagnoses,
        }
    }
}
