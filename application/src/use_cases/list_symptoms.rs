//! List Symptoms use case.
//!
//! Builds the symptom catalogue: every symptom known to the knowledge base
//! or the case database, with a display label and a category.

use crate::reference::ReferenceStore;
use crate::response::SymptomEntry;
use std::collections::BTreeSet;
use std::sync::Arc;
use triage_domain::Symptom;
use triage_domain::knowledge::category_of;

/// Category for symptoms no heuristic rule claims
pub const UNCATEGORISED: &str = "Other";

#[derive(Debug, Clone)]
pub struct ListSymptomsUseCase {
    store: Arc<ReferenceStore>,
}

impl ListSymptomsUseCase {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    /// Catalogue sorted by symptom id
    pub fn execute(&self) -> Vec<SymptomEntry> {
        let data = self.store.snapshot();

        let mut ids: BTreeSet<Symptom> = data.knowledge.known_symptoms().into_iter().cloned().collect();
        ids.extend(data.cases.columns().iter().cloned());

        ids.into_iter()
            .map(|id| {
                let category = category_of(data.knowledge.heuristics(), &id).unwrap_or(UNCATEGORISED);
                SymptomEntry {
                    label: id.display_label(),
                    category: category.to_string(),
                    id,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::test_support::reference_data;

    #[test]
    fn test_catalogue_merges_sources() {
        let store = Arc::new(ReferenceStore::new(reference_data("test")));
        let entries = ListSymptomsUseCase::new(store).execute();

        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        // From patterns only
        assert!(ids.contains(&"dehydration"));
        // From case columns only
        assert!(ids.contains(&"itching"));
        // Sorted, no duplicates
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_labels_and_categories() {
        let store = Arc::new(ReferenceStore::new(reference_data("test")));
        let entries = ListSymptomsUseCase::new(store).execute();

        let joint = entries.iter().find(|e| e.id.as_str() == "joint_pain").unwrap();
        assert_eq!(joint.label, "Joint Pain");
        assert_eq!(joint.category, "Musculoskeletal");

        let cough = entries.iter().find(|e| e.id.as_str() == "cough").unwrap();
        assert_eq!(cough.category, UNCATEGORISED);
    }
}
