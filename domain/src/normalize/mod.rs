//! Input canonicalisation: symptom tokens and specialist labels.

pub mod specialist;
pub mod symptom;

pub use specialist::SpecialistCanonicalizer;
pub use symptom::SymptomNormalizer;
