//! Reference data adapters.
//!
//! Implements the [`ReferenceSource`](triage_application::ReferenceSource)
//! port for files on disk and for the dataset compiled into the binary.

mod embedded;
mod file_source;
mod schema;

pub use embedded::EmbeddedReferenceSource;
pub use file_source::FileReferenceSource;
pub use schema::{
    CaseDatabaseFile, CaseEntry, DataFormat, HeuristicEntry, KnowledgeBaseFile, KnowledgeTables,
    NormalizerEntry, PatternEntry, RefinementEntry,
};
