//! Process-wide reference data and its atomic swap point.
//!
//! ```text
//! ReferenceSource::load() ──► ReferenceData ──► Arc ──► ReferenceStore
//!                                                          │
//!                      snapshot() per call ◄───────────────┘
//!                      replace()/reload() swap the Arc; in-flight
//!                      calls keep the snapshot they started with
//! ```

use crate::ports::reference_source::{ReferenceSource, ReferenceSourceError};
use chrono::{DateTime, Utc};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;
use triage_domain::{CaseDatabase, KnowledgeBase, SpecialistCanonicalizer, SymptomNormalizer};

/// One consistent, immutable set of reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub knowledge: KnowledgeBase,
    pub cases: CaseDatabase,
    pub normalizer: SymptomNormalizer,
    pub canonicalizer: SpecialistCanonicalizer,
    pub loaded_at: DateTime<Utc>,
}

impl ReferenceData {
    pub fn new(
        knowledge: KnowledgeBase,
        cases: CaseDatabase,
        normalizer: SymptomNormalizer,
        canonicalizer: SpecialistCanonicalizer,
    ) -> Self {
        Self {
            knowledge,
            cases,
            normalizer,
            canonicalizer,
            loaded_at: Utc::now(),
        }
    }

    /// Version label of the knowledge base
    pub fn version(&self) -> &str {
        self.knowledge.version()
    }
}

/// Holds the current [`ReferenceData`] behind an atomically swappable `Arc`.
pub struct ReferenceStore {
    source: Option<Arc<dyn ReferenceSource>>,
    current: RwLock<Arc<ReferenceData>>,
}

impl ReferenceStore {
    /// Store with fixed data and no source to reload from
    pub fn new(data: ReferenceData) -> Self {
        Self {
            source: None,
            current: RwLock::new(Arc::new(data)),
        }
    }

    /// Load initial data from `source`, keeping it for later reloads
    pub fn from_source(source: Arc<dyn ReferenceSource>) -> Result<Self, ReferenceSourceError> {
        let data = source.load()?;
        info!(
            "Loaded reference data {} from {} ({} patterns, {} cases)",
            data.version(),
            source.describe(),
            data.knowledge.len(),
            data.cases.len()
        );
        Ok(Self {
            source: Some(source),
            current: RwLock::new(Arc::new(data)),
        })
    }

    /// The data new calls should use. Holding the returned `Arc` pins that
    /// version for the duration of a call.
    pub fn snapshot(&self) -> Arc<ReferenceData> {
        // The lock only guards a pointer swap, so a poisoned lock still
        // holds a complete value.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in new data, returning the previous version
    pub fn replace(&self, data: ReferenceData) -> Arc<ReferenceData> {
        let next = Arc::new(data);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Re-load from the configured source and swap it in.
    ///
    /// On failure the current data stays in place. A store built with
    /// [`ReferenceStore::new`] has nothing to reload and returns the current
    /// snapshot.
    pub fn reload(&self) -> Result<Arc<ReferenceData>, ReferenceSourceError> {
        let Some(source) = &self.source else {
            return Ok(self.snapshot());
        };
        let data = source.load()?;
        info!("Reloaded reference data {} from {}", data.version(), source.describe());
        self.replace(data);
        Ok(self.snapshot())
    }
}

impl std::fmt::Debug for ReferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceStore")
            .field("source", &self.source.as_ref().map(|s| s.describe()))
            .field("version", &self.snapshot().version())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::reference_data;
    use super::*;
    use std::sync::Mutex;

    struct CountingSource {
        loads: Mutex<usize>,
        fail: bool,
    }

    impl ReferenceSource for CountingSource {
        fn load(&self) -> Result<ReferenceData, ReferenceSourceError> {
            if self.fail {
                return Err(ReferenceSourceError::Parse {
                    origin: "test".to_string(),
                    message: "broken".to_string(),
                });
            }
            let mut loads = self.loads.lock().unwrap();
            *loads += 1;
            Ok(reference_data(&format!("v{}", loads)))
        }

        fn describe(&self) -> String {
            "counting source".to_string()
        }
    }

    #[test]
    fn test_snapshot_survives_replace() {
        let store = ReferenceStore::new(reference_data("v1"));
        let pinned = store.snapshot();

        let previous = store.replace(reference_data("v2"));

        assert_eq!(previous.version(), "v1");
        assert_eq!(pinned.version(), "v1");
        assert_eq!(store.snapshot().version(), "v2");
    }

    #[test]
    fn test_reload_from_source() {
        let source = Arc::new(CountingSource {
            loads: Mutex::new(0),
            fail: false,
        });
        let store = ReferenceStore::from_source(source).unwrap();
        assert_eq!(store.snapshot().version(), "v1");

        let reloaded = store.reload().unwrap();
        assert_eq!(reloaded.version(), "v2");
        assert_eq!(store.snapshot().version(), "v2");
    }

    #[test]
    fn test_failed_initial_load() {
        let source = Arc::new(CountingSource {
            loads: Mutex::new(0),
            fail: true,
        });
        assert!(ReferenceStore::from_source(source).is_err());
    }

    #[test]
    fn test_reload_without_source_keeps_data() {
        let store = ReferenceStore::new(reference_data("fixed"));
        assert_eq!(store.reload().unwrap().version(), "fixed");
    }
}
