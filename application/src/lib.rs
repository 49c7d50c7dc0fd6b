//! Application layer for symptom-triage
//!
//! This crate contains use cases, port definitions, the reference data
//! store, and application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod reference;
pub mod response;
pub mod use_cases;

// Re-export commonly used types
pub use config::EngineConfig;
pub use ports::reference_source::{ReferenceSource, ReferenceSourceError};
pub use reference::{ReferenceData, ReferenceStore};
pub use response::{
    AssessmentReport, DiagnosisView, RecommendationView, ResultAssembler, SpecialistView, SymptomEntry,
};
pub use use_cases::assess_symptoms::{AssessSymptomsError, AssessSymptomsInput, AssessSymptomsUseCase};
pub use use_cases::list_symptoms::ListSymptomsUseCase;
pub use use_cases::recommend_specialists::{
    RecommendSpecialistsError, RecommendSpecialistsInput, RecommendSpecialistsOutput,
    RecommendSpecialistsUseCase,
};
pub use use_cases::resolve_diseases::{ResolveDiseasesInput, ResolveDiseasesOutput, ResolveDiseasesUseCase};
