//! Raw token → canonical symptom identifier

use crate::core::symptom::{Symptom, SymptomSet};
use std::collections::HashMap;
use tracing::{trace, warn};

/// Canonicalises raw symptom tokens.
///
/// Steps, in order:
/// 1. trim, lower-case, spaces/hyphens to `_`, collapse repeated `_`
/// 2. strip one severity suffix (`_severe`, `_mild`, ...)
/// 3. replace spelling variants token by token (`diarrhoea` → `diarrhea`)
/// 4. whole-identifier synonyms (`throw_up` → `vomiting`)
///
/// The tables come with the loaded reference data; a default normalizer only
/// applies the cleaning step.
#[derive(Debug, Clone, Default)]
pub struct SymptomNormalizer {
    spelling: HashMap<String, String>,
    severity_suffixes: Vec<String>,
    synonyms: HashMap<String, String>,
}

fn clean(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl SymptomNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spelling(mut self, variant: impl AsRef<str>, canonical: impl AsRef<str>) -> Self {
        self.spelling.insert(clean(variant.as_ref()), clean(canonical.as_ref()));
        self
    }

    pub fn with_synonym(mut self, alias: impl AsRef<str>, canonical: impl AsRef<str>) -> Self {
        self.synonyms.insert(clean(alias.as_ref()), clean(canonical.as_ref()));
        self
    }

    pub fn with_severity_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for suffix in suffixes {
            let suffix = clean(suffix.as_ref());
            if !suffix.is_empty() {
                self.severity_suffixes.push(format!("_{}", suffix));
            }
        }
        self
    }

    /// Normalize one token; `None` if nothing is left after cleaning.
    pub fn normalize(&self, raw: &str) -> Option<Symptom> {
        let mut id = clean(raw);
        if id.is_empty() {
            return None;
        }

        if let Some(stripped) = self
            .severity_suffixes
            .iter()
            .find_map(|suffix| id.strip_suffix(suffix.as_str()))
            .filter(|stripped| !stripped.is_empty())
        {
            id = stripped.to_string();
        }

        if !self.spelling.is_empty() {
            id = id
                .split('_')
                .map(|part| self.spelling.get(part).map(String::as_str).unwrap_or(part))
                .collect::<Vec<_>>()
                .join("_");
        }

        if let Some(canonical) = self.synonyms.get(&id) {
            id = canonical.clone();
        }

        if id != raw {
            trace!("Normalized '{}' -> '{}'", raw, id);
        }
        Some(Symptom::new(id))
    }

    /// Normalize a batch into a set, dropping blank tokens with a warning.
    pub fn normalize_all<I, S>(&self, raw: I) -> SymptomSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = SymptomSet::new();
        for token in raw {
            match self.normalize(token.as_ref()) {
                Some(symptom) => {
                    set.insert(symptom);
                }
                None => warn!("Dropping blank symptom token {:?}", token.as_ref()),
            }
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> SymptomNormalizer {
        SymptomNormalizer::new()
            .with_severity_suffixes(["severe", "mild", "moderate"])
            .with_spelling("diarrhoea", "diarrhea")
            .with_synonym("stomachache", "stomach_pain")
            .with_synonym("throw_up", "vomiting")
    }

    #[test]
    fn test_cleaning() {
        let normalizer = SymptomNormalizer::new();
        assert_eq!(normalizer.normalize("  Chest Pain ").unwrap().as_str(), "chest_pain");
        assert_eq!(normalizer.normalize("skin-rash").unwrap().as_str(), "skin_rash");
        assert_eq!(normalizer.normalize("jaw__pain").unwrap().as_str(), "jaw_pain");
        assert!(normalizer.normalize("   ").is_none());
    }

    #[test]
    fn test_spelling_variants() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("Diarrhoea").unwrap().as_str(), "diarrhea");
        assert_eq!(normalizer.normalize("bloody_diarrhoea").unwrap().as_str(), "bloody_diarrhea");
    }

    #[test]
    fn test_severity_suffixes() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("headache_severe").unwrap().as_str(), "headache");
        assert_eq!(normalizer.normalize("cough mild").unwrap().as_str(), "cough");
        // A suffix alone is not stripped to nothing.
        assert_eq!(normalizer.normalize("_severe").unwrap().as_str(), "severe");
    }

    #[test]
    fn test_synonyms() {
        let normalizer = normalizer();
        assert_eq!(normalizer.normalize("throw up").unwrap().as_str(), "vomiting");
        assert_eq!(normalizer.normalize("Stomachache").unwrap().as_str(), "stomach_pain");
    }

    #[test]
    fn test_normalize_all_dedups() {
        let normalizer = normalizer();
        let set = normalizer.normalize_all(["diarrhoea", "Diarrhea", " ", "vomiting_severe"]);
        let ids: Vec<_> = set.iter().map(Symptom::as_str).collect();
        assert_eq!(ids, vec!["diarrhea", "vomiting"]);
    }

    #[test]
    fn test_default_has_no_tables() {
        let normalizer = SymptomNormalizer::default();
        assert_eq!(normalizer.normalize("Diarrhoea").unwrap().as_str(), "diarrhoea");
        assert_eq!(normalizer.normalize("cough_severe").unwrap().as_str(), "cough_severe");
        assert_eq!(normalizer.normalize("Throw Up").unwrap().as_str(), "throw_up");
    }
}
