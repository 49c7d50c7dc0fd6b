//! Response views and the [`ResultAssembler`] that builds them.

pub mod assembler;
pub mod views;

pub use assembler::{FALLBACK_SPECIALIST, ResultAssembler};
pub use views::{AssessmentReport, DiagnosisView, RecommendationView, SpecialistView, SymptomEntry};
