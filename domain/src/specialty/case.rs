//! Labeled case database used for specialist scoring

use crate::core::error::DomainError;
use crate::core::symptom::Symptom;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Cleaned lookup key for a column or input token: trimmed, lower-cased,
/// spaces replaced by underscores.
pub fn column_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// One historical case: the symptoms present and the specialist it was
/// routed to.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialtyCase {
    specialist: String,
    symptoms: BTreeSet<Symptom>,
}

impl SpecialtyCase {
    pub fn new<I, S>(specialist: impl Into<String>, symptoms: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symptom>,
    {
        let specialist = specialist.into().trim().to_string();
        if specialist.is_empty() {
            return Err(DomainError::InvalidCase("case has an empty specialist label".to_string()));
        }
        Ok(Self {
            specialist,
            symptoms: symptoms.into_iter().map(Into::into).collect(),
        })
    }

    pub fn specialist(&self) -> &str {
        &self.specialist
    }

    pub fn symptoms(&self) -> &BTreeSet<Symptom> {
        &self.symptoms
    }
}

/// All cases sharing one specialist label, in database order
#[derive(Debug, Clone)]
pub struct Cohort {
    pub specialist: String,
    /// Case vectors as column-index sets
    pub vectors: Vec<BTreeSet<usize>>,
}

impl Cohort {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Immutable case database: symptom columns plus labeled cases grouped
/// into per-specialist cohorts.
///
/// Cohorts keep first-appearance order of their specialist label, which is
/// the tie-break order for equal scores.
#[derive(Debug, Clone, Default)]
pub struct CaseDatabase {
    columns: Vec<Symptom>,
    keys: Vec<String>,
    key_index: HashMap<String, usize>,
    cohorts: Vec<Cohort>,
    case_count: usize,
}

impl CaseDatabase {
    /// Build the database, rejecting cases that reference unknown columns.
    pub fn new<C, S>(columns: C, cases: impl IntoIterator<Item = SpecialtyCase>) -> Result<Self, DomainError>
    where
        C: IntoIterator<Item = S>,
        S: Into<Symptom>,
    {
        let mut columns_seen: HashMap<Symptom, usize> = HashMap::new();
        let mut ordered_columns = Vec::new();
        for column in columns {
            let column: Symptom = column.into();
            let column = Symptom::new(column.as_str().trim());
            if column.as_str().is_empty() {
                return Err(DomainError::InvalidCase("blank column name".to_string()));
            }
            if columns_seen.contains_key(&column) {
                return Err(DomainError::InvalidCase(format!("duplicate column '{}'", column)));
            }
            columns_seen.insert(column.clone(), ordered_columns.len());
            ordered_columns.push(column);
        }

        let mut keys = Vec::new();
        let mut key_index = HashMap::new();
        for (index, column) in ordered_columns.iter().enumerate() {
            let clean = column_key(column.as_str());
            let squashed = clean.replace('_', "");
            for key in [clean, squashed] {
                if !key_index.contains_key(&key) {
                    key_index.insert(key.clone(), index);
                    keys.push(key);
                }
            }
        }

        let mut cohorts: Vec<Cohort> = Vec::new();
        let mut cohort_index: HashMap<String, usize> = HashMap::new();
        let mut case_count = 0;
        for case in cases {
            let mut vector = BTreeSet::new();
            for symptom in case.symptoms() {
                match columns_seen.get(symptom) {
                    Some(&index) => {
                        vector.insert(index);
                    }
                    None => {
                        return Err(DomainError::InvalidCase(format!(
                            "case for '{}' references unknown column '{}'",
                            case.specialist(),
                            symptom
                        )));
                    }
                }
            }

            let slot = match cohort_index.get(case.specialist()) {
                Some(&slot) => slot,
                None => {
                    cohort_index.insert(case.specialist().to_string(), cohorts.len());
                    cohorts.push(Cohort {
                        specialist: case.specialist().to_string(),
                        vectors: Vec::new(),
                    });
                    cohorts.len() - 1
                }
            };
            cohorts[slot].vectors.push(vector);
            case_count += 1;
        }

        debug!(
            "Case database: {} cases over {} columns, {} specialists",
            case_count,
            ordered_columns.len(),
            cohorts.len()
        );

        Ok(Self {
            columns: ordered_columns,
            keys,
            key_index,
            cohorts,
            case_count,
        })
    }

    pub fn columns(&self) -> &[Symptom] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Symptom> {
        self.columns.get(index)
    }

    /// Column index for an exact (already cleaned) lookup key
    pub fn column_for_key(&self, key: &str) -> Option<usize> {
        self.key_index.get(key).copied()
    }

    /// Lookup keys in registration order (clean form, then squashed form)
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn cohorts(&self) -> &[Cohort] {
        &self.cohorts
    }

    pub fn specialists(&self) -> impl Iterator<Item = &str> {
        self.cohorts.iter().map(|c| c.specialist.as_str())
    }

    pub fn len(&self) -> usize {
        self.case_count
    }

    pub fn is_empty(&self) -> bool {
        self.case_count == 0
    }
}
