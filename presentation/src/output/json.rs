//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use serde::Serialize;
use serde_json::json;
use triage_application::{AssessmentReport, RecommendSpecialistsOutput, ResolveDiseasesOutput, SymptomEntry};

/// Formats results as pretty-printed JSON using the camelCase view shapes
pub struct JsonFormatter;

impl JsonFormatter {
    fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn diagnoses(&self, output: &ResolveDiseasesOutput) -> String {
        Self::pretty(&output.diagnoses)
    }

    fn recommendation(&self, output: &RecommendSpecialistsOutput) -> String {
        Self::pretty(&output.view)
    }

    fn assessment(&self, report: &AssessmentReport) -> String {
        Self::pretty(report)
    }

    fn symptoms(&self, entries: &[SymptomEntry]) -> String {
        Self::pretty(entries)
    }

    fn no_match(&self, available: &[String]) -> String {
        Self::pretty(&json!({
            "error": "None of the symptoms match the case database",
            "availableSymptoms": available,
        }))
    }
}
