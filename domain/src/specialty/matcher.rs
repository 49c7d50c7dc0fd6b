//! Mapping input symptom tokens onto case-database columns.
//!
//! Two passes per token: an exact lookup on the cleaned key, then a lenient
//! token-set Jaccard match against every column. The fuzzy pass may accept
//! false positives; it exists because column names and symptom identifiers
//! are tokenised inconsistently.

use super::case::{CaseDatabase, column_key};
use std::collections::BTreeSet;

/// How an input token was mapped to a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnMatch {
    Exact(usize),
    Fuzzy { column: usize, score: f64 },
}

impl ColumnMatch {
    pub fn column(&self) -> usize {
        match self {
            ColumnMatch::Exact(column) => *column,
            ColumnMatch::Fuzzy { column, .. } => *column,
        }
    }
}

fn tokens(key: &str) -> BTreeSet<&str> {
    key.split('_').filter(|t| !t.is_empty()).collect()
}

/// Token-set Jaccard between two cleaned keys
pub fn token_jaccard(a: &str, b: &str) -> f64 {
    let a = tokens(a);
    let b = tokens(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnMatcher<'db> {
    cases: &'db CaseDatabase,
    fuzzy_threshold: f64,
}

impl<'db> ColumnMatcher<'db> {
    pub fn new(cases: &'db CaseDatabase, fuzzy_threshold: f64) -> Self {
        Self { cases, fuzzy_threshold }
    }

    /// Map one token, or `None` when no column is close enough.
    pub fn match_token(&self, token: &str) -> Option<ColumnMatch> {
        let clean = column_key(token);
        if clean.is_empty() {
            return None;
        }

        if let Some(column) = self.cases.column_for_key(&clean) {
            return Some(ColumnMatch::Exact(column));
        }

        // Highest score wins; ties keep the earlier column.
        let mut best: Option<(usize, f64)> = None;
        for (index, column) in self.cases.columns().iter().enumerate() {
            let score = token_jaccard(&clean, &column_key(column.as_str()));
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }

        best.filter(|(_, score)| *score > self.fuzzy_threshold)
            .map(|(column, score)| ColumnMatch::Fuzzy { column, score })
    }
}
