//! Specialist label canonicalisation
//!
//! Case-database labels come with near-duplicate spellings ("Rheumatologists",
//! "Cardiologist ", "Internal Medcine"). Cohorts are keyed by the canonical
//! name so those collapse into one specialist. The variant table is part of
//! the loaded reference data.

use std::collections::HashMap;

/// Raw specialist label → canonical display name
#[derive(Debug, Clone, Default)]
pub struct SpecialistCanonicalizer {
    table: HashMap<String, String>,
}

impl SpecialistCanonicalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, raw: impl AsRef<str>, canonical: impl AsRef<str>) -> Self {
        self.table
            .insert(raw.as_ref().trim().to_string(), canonical.as_ref().trim().to_string());
        self
    }

    pub fn with_names<I, R, C>(self, names: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
        R: AsRef<str>,
        C: AsRef<str>,
    {
        names
            .into_iter()
            .fold(self, |canonicalizer, (raw, canonical)| canonicalizer.with_name(raw, canonical))
    }

    /// Canonical name; unknown labels come back trimmed but otherwise unchanged.
    pub fn canonicalize(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.table
            .get(trimmed)
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicalizer() -> SpecialistCanonicalizer {
        SpecialistCanonicalizer::new().with_names([
            ("Rheumatologists", "Rheumatology"),
            ("Internal Medcine", "Internal Medicine"),
            ("Cardiologist", "Cardiology"),
            ("ENT", "ENT"),
        ])
    }

    #[test]
    fn test_table_lookup() {
        let canonicalizer = canonicalizer();
        assert_eq!(canonicalizer.canonicalize("Rheumatologists"), "Rheumatology");
        assert_eq!(canonicalizer.canonicalize("Internal Medcine"), "Internal Medicine");
        assert_eq!(canonicalizer.canonicalize("Cardiologist "), "Cardiology");
    }

    #[test]
    fn test_unknown_name_is_identity() {
        let canonicalizer = canonicalizer();
        assert_eq!(canonicalizer.canonicalize(" Emergency Dentistry "), "Emergency Dentistry");
    }

    #[test]
    fn test_custom_entries_override() {
        let canonicalizer = canonicalizer().with_name("ENT", "Otolaryngology");
        assert_eq!(canonicalizer.canonicalize("ENT"), "Otolaryngology");
    }

    #[test]
    fn test_default_is_identity() {
        let canonicalizer = SpecialistCanonicalizer::default();
        assert!(canonicalizer.is_empty());
        assert_eq!(canonicalizer.canonicalize("Rheumatologists "), "Rheumatologists");
    }
}
