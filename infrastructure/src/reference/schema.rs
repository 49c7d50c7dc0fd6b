//! On-disk reference data formats
//!
//! Two documents make up a data set:
//!
//! - the knowledge base: patterns, disease → specialist table, heuristic
//!   categories and the normalisation tables
//! - the case database: symptom columns and labelled cases
//!
//! Both are accepted as TOML or JSON, chosen by file extension.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use triage_application::{ReferenceData, ReferenceSourceError};
use triage_domain::knowledge::HeuristicRule;
use triage_domain::{
    CaseDatabase, DiseasePattern, DomainError, KnowledgeBase, SpecialistCanonicalizer, SpecialtyCase, Symptom,
    SymptomNormalizer,
};

/// Serialisation format of a reference document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Toml,
    Json,
}

impl DataFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, ReferenceSourceError> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(DataFormat::Toml),
            Some("json") => Ok(DataFormat::Json),
            _ => Err(ReferenceSourceError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Raw text of one reference document plus where it came from
#[derive(Debug, Clone)]
pub(crate) struct Document {
    pub text: Cow<'static, str>,
    pub format: DataFormat,
    pub origin: String,
}

impl Document {
    pub fn read(path: &Path) -> Result<Self, ReferenceSourceError> {
        let format = DataFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|source| ReferenceSourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            text: Cow::Owned(text),
            format,
            origin: path.display().to_string(),
        })
    }

    pub fn embedded(text: &'static str, origin: &str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            format: DataFormat::Toml,
            origin: origin.to_string(),
        }
    }

    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, ReferenceSourceError> {
        let parsed = match self.format {
            DataFormat::Toml => toml::from_str(&self.text).map_err(|e| e.to_string()),
            DataFormat::Json => serde_json::from_str(&self.text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ReferenceSourceError::Parse {
            origin: self.origin.clone(),
            message,
        })
    }
}

// ==================== Knowledge base document ====================

/// Knowledge base document.
///
/// ```toml
/// version = "2024.1"
/// default_specialist = "Internal Medicine"
///
/// [[pattern]]
/// symptoms = ["diarrhea", "vomiting", "dehydration"]
/// disease = "Cholera"
/// confidence = 0.75
///
/// [specialists]
/// "Cholera" = "Gastroenterology"
/// ```
///
/// Patterns sharing a symptom set override earlier ones in place, so a
/// document can be laid out as a base table followed by corrections.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBaseFile {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub default_specialist: Option<String>,
    #[serde(default, rename = "pattern")]
    pub patterns: Vec<PatternEntry>,
    #[serde(default)]
    pub specialists: BTreeMap<String, String>,
    #[serde(default, rename = "heuristic")]
    pub heuristics: Vec<HeuristicEntry>,
    /// Falls back to the embedded document's table when absent
    #[serde(default)]
    pub normalizer: Option<NormalizerEntry>,
    /// Falls back to the embedded document's table when absent
    #[serde(default)]
    pub canonical_specialists: Option<BTreeMap<String, String>>,
}

fn default_version() -> String {
    "unversioned".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatternEntry {
    pub symptoms: Vec<String>,
    pub disease: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeuristicEntry {
    pub category: String,
    pub keywords: Vec<String>,
    pub disease: String,
    pub specialist: String,
    pub confidence: f64,
    #[serde(default, rename = "refinement")]
    pub refinements: Vec<RefinementEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefinementEntry {
    pub requires: Vec<String>,
    pub disease: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NormalizerEntry {
    pub severity_suffixes: Vec<String>,
    pub spelling: BTreeMap<String, String>,
    pub synonyms: BTreeMap<String, String>,
}

impl NormalizerEntry {
    pub fn to_normalizer(&self) -> SymptomNormalizer {
        let normalizer = SymptomNormalizer::new().with_severity_suffixes(&self.severity_suffixes);
        let normalizer = self
            .spelling
            .iter()
            .fold(normalizer, |n, (variant, canonical)| n.with_spelling(variant, canonical));
        self.synonyms
            .iter()
            .fold(normalizer, |n, (alias, canonical)| n.with_synonym(alias, canonical))
    }
}

/// The lookup tables alone, read from the embedded knowledge base
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LookupTables {
    normalizer: Option<NormalizerEntry>,
    canonical_specialists: Option<BTreeMap<String, String>>,
}

impl LookupTables {
    fn embedded() -> Self {
        super::embedded::knowledge_base_document()
            .parse()
            .unwrap_or_else(|e| {
                warn!("Embedded lookup tables unreadable, using none: {}", e);
                Self::default()
            })
    }
}

/// Everything the knowledge base document provides
#[derive(Debug, Clone)]
pub struct KnowledgeTables {
    pub knowledge: KnowledgeBase,
    pub normalizer: SymptomNormalizer,
    pub canonicalizer: SpecialistCanonicalizer,
}

impl KnowledgeBaseFile {
    /// Validate and build the in-memory tables.
    ///
    /// Pattern and refinement symptoms pass through the document's own
    /// normalizer, so a pattern written as `diarrhoea` matches input that
    /// normalises to `diarrhea`.
    pub fn into_tables(self) -> Result<KnowledgeTables, DomainError> {
        let fallback = if self.normalizer.is_some() && self.canonical_specialists.is_some() {
            LookupTables::default()
        } else {
            LookupTables::embedded()
        };
        let normalizer = self
            .normalizer
            .as_ref()
            .or(fallback.normalizer.as_ref())
            .map(NormalizerEntry::to_normalizer)
            .unwrap_or_default();
        let canonicalizer = self
            .canonical_specialists
            .as_ref()
            .or(fallback.canonical_specialists.as_ref())
            .map(|names| SpecialistCanonicalizer::new().with_names(names))
            .unwrap_or_default();

        let mut builder = KnowledgeBase::builder().version(self.version);
        if let Some(specialist) = self.default_specialist {
            builder = builder.default_specialist(specialist);
        }

        for entry in self.patterns {
            let symptoms = entry.symptoms.iter().filter_map(|s| normalizer.normalize(s));
            builder = builder.pattern(DiseasePattern::new(symptoms, entry.disease, entry.confidence)?);
        }

        for (disease, specialist) in self.specialists {
            builder = builder.specialist(disease, specialist);
        }

        for entry in self.heuristics {
            let mut rule = HeuristicRule::new(
                entry.category,
                entry.keywords,
                entry.disease,
                entry.specialist,
                entry.confidence,
            )?;
            for refinement in entry.refinements {
                let requires: Vec<_> = refinement
                    .requires
                    .iter()
                    .filter_map(|s| normalizer.normalize(s))
                    .collect();
                rule = rule.with_refinement(requires, refinement.disease, refinement.confidence)?;
            }
            builder = builder.heuristic(rule);
        }

        Ok(KnowledgeTables {
            knowledge: builder.build(),
            normalizer,
            canonicalizer,
        })
    }
}

// ==================== Case database document ====================

/// Case database document.
///
/// ```toml
/// columns = ["joint_pain", "stiffness", "cough"]
///
/// [[case]]
/// specialist = "Rheumatologists"
/// symptoms = ["joint_pain", "stiffness"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CaseDatabaseFile {
    pub columns: Vec<String>,
    #[serde(default, rename = "case")]
    pub cases: Vec<CaseEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaseEntry {
    pub specialist: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
}

impl CaseDatabaseFile {
    /// Build the case database.
    ///
    /// Columns and case symptoms go through the same normalizer as user
    /// input, so a column written as `diarrhoea` is reachable. Columns that
    /// normalise onto an earlier one fold into it. Specialist label variants
    /// collapse through the canonicalizer.
    pub fn into_database(
        self,
        normalizer: &SymptomNormalizer,
        canonicalizer: &SpecialistCanonicalizer,
    ) -> Result<CaseDatabase, DomainError> {
        let mut columns: Vec<Symptom> = Vec::with_capacity(self.columns.len());
        let mut written: BTreeSet<&str> = BTreeSet::new();
        for raw in &self.columns {
            let column = normalizer
                .normalize(raw)
                .ok_or_else(|| DomainError::InvalidCase("blank column name".to_string()))?;
            // A repeated spelling stays a duplicate error; a variant folds.
            if written.insert(raw.trim()) && columns.contains(&column) {
                debug!("Column '{}' folds into '{}'", raw, column);
                continue;
            }
            columns.push(column);
        }

        let cases = self
            .cases
            .into_iter()
            .map(|case| {
                let symptoms = case.symptoms.iter().filter_map(|s| normalizer.normalize(s));
                SpecialtyCase::new(canonicalizer.canonicalize(&case.specialist), symptoms)
            })
            .collect::<Result<Vec<_>, _>>()?;
        CaseDatabase::new(columns, cases)
    }
}

/// Parse and validate both documents into one [`ReferenceData`].
pub(crate) fn assemble(knowledge: &Document, cases: &Document) -> Result<ReferenceData, ReferenceSourceError> {
    let tables = knowledge
        .parse::<KnowledgeBaseFile>()?
        .into_tables()
        .map_err(|source| ReferenceSourceError::Invalid {
            origin: knowledge.origin.clone(),
            source,
        })?;
    debug!(
        "Knowledge base '{}' from {}: {} patterns",
        tables.knowledge.version(),
        knowledge.origin,
        tables.knowledge.len()
    );

    let database = cases
        .parse::<CaseDatabaseFile>()?
        .into_database(&tables.normalizer, &tables.canonicalizer)
        .map_err(|source| ReferenceSourceError::Invalid {
            origin: cases.origin.clone(),
            source,
        })?;
    debug!(
        "Case database from {}: {} cases, {} specialists",
        cases.origin,
        database.len(),
        database.cohorts().len()
    );

    Ok(ReferenceData::new(
        tables.knowledge,
        database,
        tables.normalizer,
        tables.canonicalizer,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KB: &str = r#"
version = "test-1"

[[pattern]]
symptoms = ["diarrhoea", "vomiting", "dehydration"]
disease = "Cholera"
confidence = 0.75

[[pattern]]
symptoms = ["skin_rash", "itching"]
disease = "Eczema"
confidence = 0.75

[[pattern]]
symptoms = ["itching", "skin_rash"]
disease = "Skin Irritation"
confidence = 0.75

[specialists]
"Cholera" = "Gastroenterology"

[[heuristic]]
category = "Dental"
keywords = ["tooth", "jaw"]
disease = "Dental Problem"
specialist = "Dentistry"
confidence = 0.7

[[heuristic.refinement]]
requires = ["toothache"]
disease = "Dental Infection"
confidence = 0.8

[normalizer]
severity_suffixes = ["severe"]

[normalizer.spelling]
diarrhoea = "diarrhea"

[canonical_specialists]
"Rheumatologists" = "Rheumatology"
"#;

    const CASES: &str = r#"
columns = ["joint_pain", "stiffness", "cough"]

[[case]]
specialist = "Rheumatologists"
symptoms = ["joint_pain", "stiffness"]

[[case]]
specialist = "Rheumatology"
symptoms = ["joint_pain"]

[[case]]
specialist = "Pulmonology"
symptoms = ["cough"]
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("kb.toml")).unwrap(), DataFormat::Toml);
        assert_eq!(DataFormat::from_path(Path::new("cases.JSON")).unwrap(), DataFormat::Json);
        assert!(matches!(
            DataFormat::from_path(Path::new("cases.csv")),
            Err(ReferenceSourceError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_knowledge_tables() {
        let file: KnowledgeBaseFile = toml::from_str(KB).unwrap();
        let tables = file.into_tables().unwrap();

        assert_eq!(tables.knowledge.version(), "test-1");
        // Later duplicate replaced the earlier entry
        assert_eq!(tables.knowledge.len(), 2);
        assert_eq!(tables.knowledge.patterns()[1].disease(), "Skin Irritation");
        // Pattern symptoms were normalised
        assert!(
            tables.knowledge.patterns()[0]
                .symptoms()
                .iter()
                .any(|s| s.as_str() == "diarrhea")
        );
        assert_eq!(tables.knowledge.specialist_for("Cholera"), "Gastroenterology");
        assert_eq!(tables.knowledge.heuristics()[0].refinements().len(), 1);
        assert_eq!(tables.normalizer.normalize("vomiting_severe").unwrap().as_str(), "vomiting");
        assert_eq!(tables.canonicalizer.canonicalize("Rheumatologists"), "Rheumatology");
        // Only the document's names are used
        assert_eq!(tables.canonicalizer.canonicalize("Cardiologist"), "Cardiologist");
    }

    #[test]
    fn test_missing_sections_fall_back_to_embedded_tables() {
        let file: KnowledgeBaseFile = toml::from_str(
            r#"
[[pattern]]
symptoms = ["cough", "fever"]
disease = "Common Cold"
confidence = 0.7
"#,
        )
        .unwrap();
        let tables = file.into_tables().unwrap();
        assert_eq!(tables.knowledge.version(), "unversioned");
        assert_eq!(tables.normalizer.normalize("Diarrhoea").unwrap().as_str(), "diarrhea");
        assert_eq!(tables.canonicalizer.canonicalize("Cardiologist"), "Cardiology");
        // The embedded table has no heartburn synonym
        assert_eq!(tables.normalizer.normalize("heartburn").unwrap().as_str(), "heartburn");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let file: KnowledgeBaseFile = toml::from_str(
            r#"
[[pattern]]
symptoms = ["cough"]
disease = "Overconfident"
confidence = 1.5
"#,
        )
        .unwrap();
        assert!(matches!(file.into_tables(), Err(DomainError::InvalidPattern(_))));
    }

    #[test]
    fn test_case_database_canonicalises_specialists() {
        let file: CaseDatabaseFile = toml::from_str(CASES).unwrap();
        let canonicalizer = SpecialistCanonicalizer::new().with_name("Rheumatologists", "Rheumatology");
        let database = file.into_database(&SymptomNormalizer::new(), &canonicalizer).unwrap();

        assert_eq!(database.len(), 3);
        let specialists: Vec<_> = database.specialists().collect();
        assert_eq!(specialists, vec!["Rheumatology", "Pulmonology"]);
        assert_eq!(database.cohorts()[0].len(), 2);
    }

    #[test]
    fn test_case_with_unknown_column_rejected() {
        let file: CaseDatabaseFile = toml::from_str(
            r#"
columns = ["cough"]

[[case]]
specialist = "Pulmonology"
symptoms = ["wheezing"]
"#,
        )
        .unwrap();
        let result = file.into_database(&SymptomNormalizer::new(), &SpecialistCanonicalizer::new());
        assert!(matches!(result, Err(DomainError::InvalidCase(_))));
    }

    #[test]
    fn test_case_columns_normalised() {
        let file: CaseDatabaseFile = toml::from_str(
            r#"
columns = ["Diarrhoea", "vomiting_severe", "diarrhea"]

[[case]]
specialist = "Gastroenterology"
symptoms = ["diarrhoea", "Vomiting"]
"#,
        )
        .unwrap();
        let normalizer = SymptomNormalizer::new()
            .with_severity_suffixes(["severe"])
            .with_spelling("diarrhoea", "diarrhea");
        let database = file.into_database(&normalizer, &SpecialistCanonicalizer::new()).unwrap();

        let columns: Vec<_> = database.columns().iter().map(Symptom::as_str).collect();
        assert_eq!(columns, vec!["diarrhea", "vomiting"]);
        assert_eq!(database.len(), 1);
    }

    #[test]
    fn test_duplicate_column_still_rejected() {
        let file: CaseDatabaseFile = toml::from_str(r#"columns = ["cough", "cough"]"#).unwrap();
        let result = file.into_database(&SymptomNormalizer::new(), &SpecialistCanonicalizer::new());
        assert!(matches!(result, Err(DomainError::InvalidCase(_))));
    }

    #[test]
    fn test_assemble_json_cases() {
        let knowledge = Document::embedded(KB, "kb");
        let cases = Document {
            text: Cow::Borrowed(
                r#"{"columns": ["cough", "fever"], "case": [{"specialist": "Pulmonologist", "symptoms": ["cough"]}]}"#,
            ),
            format: DataFormat::Json,
            origin: "cases.json".to_string(),
        };

        let data = assemble(&knowledge, &cases).unwrap();
        assert_eq!(data.version(), "test-1");
        // The document's canonical table has no entry for Pulmonologist
        assert_eq!(data.cases.specialists().next(), Some("Pulmonologist"));
    }

    #[test]
    fn test_assemble_reports_origin_of_parse_error() {
        let knowledge = Document::embedded("version = [", "broken.toml");
        let cases = Document::embedded(CASES, "cases.toml");
        match assemble(&knowledge, &cases) {
            Err(ReferenceSourceError::Parse { origin, .. }) => assert_eq!(origin, "broken.toml"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
