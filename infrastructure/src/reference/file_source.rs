//! Reference source reading TOML/JSON files from disk

use super::embedded;
use super::schema::{Document, assemble};
use std::path::{Path, PathBuf};
use tracing::debug;
use triage_application::{ReferenceData, ReferenceSource, ReferenceSourceError};

/// Loads reference data from files, falling back to the embedded dataset
/// for any document without a path.
///
/// Files are re-read on every [`load`](ReferenceSource::load), so a
/// [`ReferenceStore::reload`](triage_application::ReferenceStore::reload)
/// picks up edits.
#[derive(Debug, Clone, Default)]
pub struct FileReferenceSource {
    knowledge_base: Option<PathBuf>,
    case_database: Option<PathBuf>,
}

impl FileReferenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_knowledge_base(mut self, path: impl Into<PathBuf>) -> Self {
        self.knowledge_base = Some(path.into());
        self
    }

    pub fn with_case_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.case_database = Some(path.into());
        self
    }

    pub fn knowledge_base(&self) -> Option<&Path> {
        self.knowledge_base.as_deref()
    }

    pub fn case_database(&self) -> Option<&Path> {
        self.case_database.as_deref()
    }
}

impl ReferenceSource for FileReferenceSource {
    fn load(&self) -> Result<ReferenceData, ReferenceSourceError> {
        let knowledge = match &self.knowledge_base {
            Some(path) => Document::read(path)?,
            None => embedded::knowledge_base_document(),
        };
        let cases = match &self.case_database {
            Some(path) => Document::read(path)?,
            None => embedded::case_database_document(),
        };

        let data = assemble(&knowledge, &cases)?;
        debug!(
            "Loaded reference data '{}' from {} and {}",
            data.version(),
            knowledge.origin,
            cases.origin
        );
        Ok(data)
    }

    fn describe(&self) -> String {
        let describe = |path: &Option<PathBuf>| match path {
            Some(p) => p.display().to_string(),
            None => "embedded".to_string(),
        };
        format!(
            "knowledge base: {}, case database: {}",
            describe(&self.knowledge_base),
            describe(&self.case_database)
        )
    }
}
