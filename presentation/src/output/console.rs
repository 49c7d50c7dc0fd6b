//! Console output formatter for triage results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use triage_application::{
    AssessmentReport, DiagnosisView, RecommendSpecialistsOutput, RecommendationView, ResolveDiseasesOutput,
    SymptomEntry,
};
use triage_domain::{ConfidenceLevel, Symptom};

const DISCLAIMER: &str = "This is not medical advice. Consult a healthcare professional.";

/// Formats triage results for console display
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter {
    quiet: bool,
}

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop headers, footers and the disclaimer
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Format ranked disease candidates
    pub fn format_diagnoses(&self, output: &ResolveDiseasesOutput) -> String {
        let mut out = String::new();

        if !self.quiet {
            out.push_str(&Self::header("Disease Candidates"));
            out.push('\n');
            out.push_str(&format!(
                "{} {}\n",
                "Symptoms:".cyan().bold(),
                Self::join(output.active_symptoms.iter())
            ));
            out.push_str(&format!(
                "{} {}\n",
                "Knowledge base:".cyan().bold(),
                output.knowledge_version
            ));
        }

        Self::push_diagnoses(&mut out, &output.diagnoses);

        if !self.quiet {
            out.push_str(&Self::footer());
        }
        out
    }

    /// Format specialist recommendations
    pub fn format_recommendation(&self, output: &RecommendSpecialistsOutput) -> String {
        let mut out = String::new();

        if !self.quiet {
            out.push_str(&Self::header("Specialist Recommendations"));
            out.push('\n');
        }

        Self::push_recommendation(&mut out, &output.view);

        if !self.quiet {
            out.push_str(&Self::footer());
        }
        out
    }

    /// Format the combined report
    pub fn format_assessment(&self, report: &AssessmentReport) -> String {
        let mut out = String::new();

        if !self.quiet {
            out.push_str(&Self::header("Symptom Assessment"));
            out.push('\n');
            out.push_str(&format!(
                "{} {}\n",
                "Symptoms:".cyan().bold(),
                Self::join(report.active_symptoms.iter())
            ));
        }

        out.push_str(&format!(
            "{} {}\n",
            "Primary specialist:".green().bold(),
            report.primary_specialist
        ));
        if let Some(confidence) = report.confidence {
            out.push_str(&format!("{} {}\n", "Confidence:".bold(), Self::percent(confidence)));
        }

        out.push_str(&Self::section_header("Possible Conditions"));
        Self::push_diagnoses(&mut out, &report.diagnoses);

        out.push_str(&Self::section_header("Specialists From Similar Cases"));
        match &report.specialists {
            Some(view) => Self::push_recommendation(&mut out, view),
            None => out.push_str(&format!("{}\n", "No similar cases found.".yellow())),
        }

        if !self.quiet {
            out.push_str(&format!("\n{}\n", DISCLAIMER.dimmed()));
            out.push_str(&Self::footer());
        }
        out
    }

    /// Format the symptom catalogue grouped by category
    pub fn format_symptoms(&self, entries: &[SymptomEntry]) -> String {
        let mut out = String::new();

        if !self.quiet {
            out.push_str(&Self::header("Known Symptoms"));
            out.push('\n');
        }

        let mut categories: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();

        for category in categories {
            out.push_str(&format!("\n{}\n", category.cyan().bold()));
            for entry in entries.iter().filter(|e| e.category == category) {
                out.push_str(&format!("  {:<28} {}\n", entry.id.as_str(), entry.label.dimmed()));
            }
        }

        if !self.quiet {
            out.push_str(&format!("\n{} {}\n", "Total:".bold(), entries.len()));
            out.push_str(&Self::footer());
        }
        out
    }

    /// Format the no-match diagnostic
    pub fn format_no_match(&self, available: &[String]) -> String {
        let mut out = format!(
            "{}\n",
            "None of the given symptoms match the case database.".red().bold()
        );
        if !available.is_empty() {
            out.push_str(&format!("{}\n", "Some known symptoms:".cyan()));
            out.push_str(&Self::indent(&available.join("\n"), "  "));
            out.push('\n');
        }
        out
    }

    fn push_diagnoses(out: &mut String, diagnoses: &[DiagnosisView]) {
        if diagnoses.is_empty() {
            out.push_str(&format!("\n{}\n", "No matching diseases found.".yellow()));
            return;
        }

        for (rank, diagnosis) in diagnoses.iter().enumerate() {
            out.push_str(&format!(
                "\n{:>2}. {}  {}  {}\n",
                rank + 1,
                diagnosis.disease.yellow().bold(),
                format!("[{}]", diagnosis.tier).dimmed(),
                Self::percent(diagnosis.confidence)
            ));
            out.push_str(&format!("    Specialist: {}\n", diagnosis.specialist));
            out.push_str(&format!(
                "    Matched:    {}\n",
                Self::join(diagnosis.matched_symptoms.iter())
            ));
            out.push_str(&format!("    {}\n", diagnosis.explanation.dimmed()));
        }
    }

    fn push_recommendation(out: &mut String, view: &RecommendationView) {
        out.push_str(&format!(
            "{} {}\n",
            "Matched symptoms:".cyan().bold(),
            Self::join(view.matched_symptoms.iter())
        ));
        out.push_str(&format!(
            "{} {:.1}% ({} specialists considered)\n",
            "Threshold:".cyan().bold(),
            view.confidence_threshold,
            view.total_specialists_considered
        ));

        if view.recommendations.is_empty() {
            out.push_str(&format!("\n{}\n", "No specialist reached the threshold.".yellow()));
            return;
        }

        for (rank, rec) in view.recommendations.iter().enumerate() {
            let level = match rec.confidence_level {
                ConfidenceLevel::High => rec.confidence_level.as_str().green(),
                ConfidenceLevel::Moderate => rec.confidence_level.as_str().yellow(),
            };
            out.push_str(&format!(
                "\n{:>2}. {}  {:.1}% ({})\n",
                rank + 1,
                rec.specialist.bold(),
                rec.confidence,
                level
            ));
            out.push_str(&format!(
                "    Cases: {}/{} matching ({:.1}%), best similarity {:.3}\n",
                rec.matching_cases, rec.total_cases, rec.match_percentage, rec.max_similarity
            ));
        }
    }

    fn join<'a>(symptoms: impl Iterator<Item = &'a Symptom>) -> String {
        symptoms.map(Symptom::as_str).collect::<Vec<_>>().join(", ")
    }

    fn percent(fraction: f64) -> String {
        format!("{:.0}%", fraction * 100.0)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn diagnoses(&self, output: &ResolveDiseasesOutput) -> String {
        self.format_diagnoses(output)
    }

    fn recommendation(&self, output: &RecommendSpecialistsOutput) -> String {
        self.format_recommendation(output)
    }

    fn assessment(&self, report: &AssessmentReport) -> String {
        self.format_assessment(report)
    }

    fn symptoms(&self, entries: &[SymptomEntry]) -> String {
        self.format_symptoms(entries)
    }

    fn no_match(&self, available: &[String]) -> String {
        self.format_no_match(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_application::ResultAssembler;
    use triage_domain::{DiseaseCandidate, MatchTier, Recommendation, SpecialtyScore, SymptomSet};

    fn plain() {
        colored::control::set_override(false);
    }

    fn candidate(disease: &str, specialist: &str, confidence: f64, tier: MatchTier) -> DiseaseCandidate {
        DiseaseCandidate {
            disease: disease.to_string(),
            confidence,
            specialist: specialist.to_string(),
            matched_symptoms: vec![Symptom::new("cough"), Symptom::new("fever")],
            tier,
        }
    }

    fn resolved(candidates: Vec<DiseaseCandidate>) -> ResolveDiseasesOutput {
        ResolveDiseasesOutput {
            active_symptoms: ["cough", "fever"].into_iter().collect::<SymptomSet>(),
            diagnoses: ResultAssembler::new(30.0).diagnoses(&candidates),
            candidates,
            knowledge_version: "2024.2".to_string(),
        }
    }

    fn recommendation() -> Recommendation {
        Recommendation {
            matched_symptoms: vec![Symptom::new("cough")],
            recommendations: vec![SpecialtyScore {
                specialist: "Pulmonology".to_string(),
                confidence_mean: 78.2,
                matching_cases: 2,
                total_cases: 3,
                max_similarity: 0.782,
            }],
            confidence_threshold: 20.0,
            total_specialists_considered: 4,
        }
    }

    #[test]
    fn test_diagnoses_text() {
        plain();
        let output = resolved(vec![
            candidate("Common Cold", "General Practitioner", 0.7, MatchTier::Exact),
            candidate("Pneumonia", "Pulmonology", 0.37, MatchTier::Partial),
        ]);
        let text = ConsoleFormatter::new().format_diagnoses(&output);

        assert!(text.contains("Disease Candidates"));
        assert!(text.contains(" 1. Common Cold"));
        assert!(text.contains("[EXACT]"));
        assert!(text.contains("70%"));
        assert!(text.contains(" 2. Pneumonia"));
        assert!(text.contains("Matched:    cough, fever"));
        assert!(text.contains("Knowledge base: 2024.2"));
    }

    #[test]
    fn test_quiet_drops_header() {
        plain();
        let output = resolved(vec![candidate("Common Cold", "General Practitioner", 0.7, MatchTier::Exact)]);
        let text = ConsoleFormatter::new().quiet(true).format_diagnoses(&output);
        assert!(!text.contains("Disease Candidates"));
        assert!(!text.contains("===="));
        assert!(text.contains("Common Cold"));
    }

    #[test]
    fn test_empty_diagnoses() {
        plain();
        let text = ConsoleFormatter::new().format_diagnoses(&resolved(Vec::new()));
        assert!(text.contains("No matching diseases found."));
    }

    #[test]
    fn test_assessment_without_cases() {
        plain();
        let active: SymptomSet = ["cough", "fever"].into_iter().collect();
        let report = ResultAssembler::new(30.0).assessment(
            &active,
            &[candidate("Common Cold", "General Practitioner", 0.7, MatchTier::Exact)],
            None,
        );
        let text = ConsoleFormatter::new().format_assessment(&report);
        assert!(text.contains("Primary specialist: General Practitioner"));
        assert!(text.contains("No similar cases found."));
        assert!(text.contains(DISCLAIMER));
    }

    #[test]
    fn test_assessment_with_cases() {
        plain();
        let active: SymptomSet = ["cough"].into_iter().collect();
        let rec = recommendation();
        let report = ResultAssembler::new(30.0).assessment(&active, &[], Some(&rec));
        let text = ConsoleFormatter::new().format_assessment(&report);
        assert!(text.contains("Primary specialist: Pulmonology"));
        assert!(text.contains("Pulmonology  78.2% (High)"));
        assert!(text.contains("Cases: 2/3 matching (66.7%)"));
        assert!(text.contains("Threshold: 20.0% (4 specialists considered)"));
    }

    #[test]
    fn test_symptoms_grouped_by_category() {
        plain();
        let entries = vec![
            SymptomEntry {
                id: Symptom::new("toothache"),
                label: "Toothache".to_string(),
                category: "Dental".to_string(),
            },
            SymptomEntry {
                id: Symptom::new("skin_rash"),
                label: "Skin Rash".to_string(),
                category: "Dermatological".to_string(),
            },
        ];
        let text = ConsoleFormatter::new().format_symptoms(&entries);
        let dental = text.find("Dental").unwrap();
        let derm = text.find("Dermatological").unwrap();
        assert!(dental < derm);
        assert!(text.contains("Total: 2"));
    }

    #[test]
    fn test_no_match_lists_sample() {
        plain();
        let text = ConsoleFormatter::new().format_no_match(&["cough".to_string(), "fever".to_string()]);
        assert!(text.contains("None of the given symptoms match"));
        assert!(text.contains("  cough\n  fever"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
