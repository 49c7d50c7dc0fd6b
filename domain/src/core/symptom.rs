//! Symptom value objects

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;

/// A canonical symptom identifier (Value Object)
///
/// Equality is exact string equality. Canonicalisation (case, spacing,
/// spelling variants) is the job of
/// [`SymptomNormalizer`](crate::normalize::SymptomNormalizer); no synonym
/// resolution happens past this point.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symptom(String);

impl Symptom {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Human readable label, e.g. `chest_pain` -> `Chest Pain`
    pub fn display_label(&self) -> String {
        self.0
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for Symptom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symptom {
    fn from(s: &str) -> Self {
        Symptom::new(s)
    }
}

impl From<String> for Symptom {
    fn from(s: String) -> Self {
        Symptom(s)
    }
}

/// One patient's active complaints.
///
/// Behaves as a set (no duplicates, order-insensitive equality) but keeps
/// first-insertion order so that combination enumeration over it is
/// deterministic for a given input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Symptom>", into = "Vec<Symptom>")]
pub struct SymptomSet {
    ordered: Vec<Symptom>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symptom, returning `false` if it was already present
    pub fn insert(&mut self, symptom: impl Into<Symptom>) -> bool {
        let symptom = symptom.into();
        if self.ordered.contains(&symptom) {
            return false;
        }
        self.ordered.push(symptom);
        true
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.ordered.iter().any(|s| s.as_str() == symptom)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symptom> {
        self.ordered.iter()
    }

    /// Symptoms in insertion order
    pub fn as_slice(&self) -> &[Symptom] {
        &self.ordered
    }

    /// Symptoms in canonical (sorted) order
    pub fn sorted(&self) -> BTreeSet<Symptom> {
        self.ordered.iter().cloned().collect()
    }

    /// Symptoms of this set that also appear in `other`, in insertion order
    pub fn intersection<'a>(&'a self, other: &'a BTreeSet<Symptom>) -> impl Iterator<Item = &'a Symptom> + 'a {
        self.ordered.iter().filter(move |s| other.contains(*s))
    }

    pub fn overlap(&self, other: &BTreeSet<Symptom>) -> usize {
        self.intersection(other).count()
    }
}

impl PartialEq for SymptomSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.ordered.iter().all(|s| other.ordered.contains(s))
    }
}

impl Eq for SymptomSet {}

impl<S: Into<Symptom>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymptomSet::new();
        for symptom in iter {
            set.insert(symptom);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SymptomSet {
    type Item = &'a Symptom;
    type IntoIter = std::slice::Iter<'a, Symptom>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}

impl From<Vec<Symptom>> for SymptomSet {
    fn from(symptoms: Vec<Symptom>) -> Self {
        symptoms.into_iter().collect()
    }
}

impl From<SymptomSet> for Vec<Symptom> {
    fn from(set: SymptomSet) -> Self {
        set.ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symptom_display_label() {
        assert_eq!(Symptom::new("chest_pain").display_label(), "Chest Pain");
        assert_eq!(Symptom::new("fever").display_label(), "Fever");
        assert_eq!(
            Symptom::new("pain_behind_the_eyes").display_label(),
            "Pain Behind The Eyes"
        );
    }

    #[test]
    fn test_set_deduplicates_and_keeps_order() {
        let set: SymptomSet = ["cough", "fever", "cough", "headache"].into_iter().collect();
        assert_eq!(set.len(), 3);
        let names: Vec<_> = set.iter().map(Symptom::as_str).collect();
        assert_eq!(names, vec!["cough", "fever", "headache"]);
    }

    #[test]
    fn test_set_equality_ignores_order() {
        let a: SymptomSet = ["cough", "fever"].into_iter().collect();
        let b: SymptomSet = ["fever", "cough"].into_iter().collect();
        let c: SymptomSet = ["fever"].into_iter().collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_overlap() {
        let set: SymptomSet = ["cough", "fever", "fatigue"].into_iter().collect();
        let pattern: BTreeSet<Symptom> = ["fever", "chills"].into_iter().map(Symptom::from).collect();
        assert_eq!(set.overlap(&pattern), 1);
        assert!(set.contains("fatigue"));
        assert!(!set.contains("chills"));
    }

    #[test]
    fn test_serde_as_list() {
        let set: SymptomSet = ["cough", "fever"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["cough","fever"]"#);
        let back: SymptomSet = serde_json::from_str(r#"["fever","fever","cough"]"#).unwrap();
        assert_eq!(back, set);
    }
}
