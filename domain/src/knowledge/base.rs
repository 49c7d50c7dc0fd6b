//! The immutable knowledge base consumed by the disease resolver.

use super::heuristic::HeuristicRule;
use super::pattern::{DiseasePattern, PatternKey};
use crate::core::symptom::Symptom;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Specialist used for diseases missing from the specialist table
pub const DEFAULT_SPECIALIST: &str = "Internal Medicine";

/// Symptom-set → disease patterns, disease → specialist table, and category
/// heuristics.
///
/// Built once through [`KnowledgeBaseBuilder`] and never mutated
/// afterwards, so it can be shared freely between concurrent requests.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    version: String,
    patterns: Vec<DiseasePattern>,
    index: HashMap<PatternKey, usize>,
    specialists: HashMap<String, String>,
    default_specialist: String,
    heuristics: Vec<HeuristicRule>,
}

impl KnowledgeBase {
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Patterns in registration order (one per distinct symptom set)
    pub fn patterns(&self) -> &[DiseasePattern] {
        &self.patterns
    }

    pub fn pattern(&self, index: usize) -> Option<&DiseasePattern> {
        self.patterns.get(index)
    }

    /// Exact set-keyed lookup, returning the pattern's index and the pattern
    pub fn lookup(&self, key: &PatternKey) -> Option<(usize, &DiseasePattern)> {
        self.index.get(key).map(|&i| (i, &self.patterns[i]))
    }

    pub fn specialist_for(&self, disease: &str) -> &str {
        self.specialists
            .get(disease)
            .map(String::as_str)
            .unwrap_or(&self.default_specialist)
    }

    pub fn default_specialist(&self) -> &str {
        &self.default_specialist
    }

    pub fn heuristics(&self) -> &[HeuristicRule] {
        &self.heuristics
    }

    /// Every symptom named by at least one pattern
    pub fn known_symptoms(&self) -> BTreeSet<&Symptom> {
        self.patterns.iter().flat_map(|p| p.symptoms().iter()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        KnowledgeBaseBuilder::default().build()
    }
}

/// Builder for [`KnowledgeBase`]
///
/// Registering a pattern whose symptom set is already present replaces the
/// earlier pattern in place, so later tables override earlier ones without
/// changing enumeration order.
#[derive(Debug)]
pub struct KnowledgeBaseBuilder {
    version: String,
    patterns: Vec<DiseasePattern>,
    index: HashMap<PatternKey, usize>,
    specialists: HashMap<String, String>,
    default_specialist: String,
    heuristics: Vec<HeuristicRule>,
}

impl Default for KnowledgeBaseBuilder {
    fn default() -> Self {
        Self {
            version: "unversioned".to_string(),
            patterns: Vec::new(),
            index: HashMap::new(),
            specialists: HashMap::new(),
            default_specialist: DEFAULT_SPECIALIST.to_string(),
            heuristics: Vec::new(),
        }
    }
}

impl KnowledgeBaseBuilder {
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn pattern(mut self, pattern: DiseasePattern) -> Self {
        self.add_pattern(pattern);
        self
    }

    pub fn patterns(mut self, patterns: impl IntoIterator<Item = DiseasePattern>) -> Self {
        for pattern in patterns {
            self.add_pattern(pattern);
        }
        self
    }

    pub fn specialist(mut self, disease: impl Into<String>, specialist: impl Into<String>) -> Self {
        self.specialists.insert(disease.into(), specialist.into());
        self
    }

    pub fn default_specialist(mut self, specialist: impl Into<String>) -> Self {
        self.default_specialist = specialist.into();
        self
    }

    pub fn heuristic(mut self, rule: HeuristicRule) -> Self {
        self.heuristics.push(rule);
        self
    }

    pub fn build(self) -> KnowledgeBase {
        debug!(
            "Built knowledge base {} with {} patterns, {} specialist mappings, {} heuristics",
            self.version,
            self.patterns.len(),
            self.specialists.len(),
            self.heuristics.len()
        );
        KnowledgeBase {
            version: self.version,
            patterns: self.patterns,
            index: self.index,
            specialists: self.specialists,
            default_specialist: self.default_specialist,
            heuristics: self.heuristics,
        }
    }

    fn add_pattern(&mut self, pattern: DiseasePattern) {
        let key = pattern.key();
        match self.index.get(&key) {
            Some(&existing) => {
                debug!(
                    "Pattern {:?} overrides '{}' with '{}'",
                    key.symptoms(),
                    self.patterns[existing].disease(),
                    pattern.disease()
                );
                self.patterns[existing] = pattern;
            }
            None => {
                self.index.insert(key, self.patterns.len());
                self.patterns.push(pattern);
            }
        }
    }
}
