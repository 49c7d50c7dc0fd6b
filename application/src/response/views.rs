//! Externally visible response shapes.
//!
//! Field names are part of the output contract (camelCase JSON).

use serde::Serialize;
use triage_domain::{ConfidenceLevel, MatchTier, Symptom};

/// One disease diagnosis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisView {
    pub disease: String,
    pub probability: f64,
    pub specialist: String,
    pub confidence: f64,
    pub matched_symptoms: Vec<Symptom>,
    pub explanation: String,
    pub tier: MatchTier,
}

/// One recommended specialist
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialistView {
    pub specialist: String,
    /// Percentage, one decimal
    pub confidence: f64,
    pub matching_cases: usize,
    pub total_cases: usize,
    /// Percentage, one decimal
    pub match_percentage: f64,
    /// Three decimals
    pub max_similarity: f64,
    pub confidence_level: ConfidenceLevel,
}

/// Specialist recommendation response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationView {
    pub matched_symptoms: Vec<Symptom>,
    pub recommendations: Vec<SpecialistView>,
    pub confidence_threshold: f64,
    pub total_specialists_considered: usize,
}

/// Combined report of both scoring components
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub diagnoses: Vec<DiagnosisView>,
    pub primary_specialist: String,
    /// Confidence of the top diagnosis, if any
    pub confidence: Option<f64>,
    pub suggested_diseases: Vec<String>,
    /// Distinct diagnosis specialists, in diagnosis order
    pub disease_based_specialists: Vec<String>,
    /// `None` when no symptom matched the case database
    pub specialists: Option<RecommendationView>,
    pub active_symptoms: Vec<Symptom>,
}

/// One catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomEntry {
    pub id: Symptom,
    pub label: String,
    pub category: String,
}
