//! Output formatter trait

use triage_application::{AssessmentReport, RecommendSpecialistsOutput, ResolveDiseasesOutput, SymptomEntry};

/// Trait for formatting triage results
pub trait OutputFormatter {
    /// Format ranked disease candidates
    fn diagnoses(&self, output: &ResolveDiseasesOutput) -> String;

    /// Format specialist recommendations
    fn recommendation(&self, output: &RecommendSpecialistsOutput) -> String;

    /// Format the combined report
    fn assessment(&self, report: &AssessmentReport) -> String;

    /// Format the symptom catalogue
    fn symptoms(&self, entries: &[SymptomEntry]) -> String;

    /// Format the "no symptom matched the case database" diagnostic
    fn no_match(&self, available: &[String]) -> String;
}
