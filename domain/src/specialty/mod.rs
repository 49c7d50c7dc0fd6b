//! Specialist recommendation domain
//!
//! Scores medical specialties against a labeled [`CaseDatabase`] with a
//! weighted blend of set similarities and a dynamic confidence threshold.

pub mod case;
pub mod matcher;
pub mod recommender;
pub mod score;
pub mod similarity;

pub use case::{CaseDatabase, Cohort, SpecialtyCase, column_key};
pub use matcher::{ColumnMatch, ColumnMatcher, token_jaccard};
pub use recommender::{CaseSimilarityRecommender, Recommendation, RecommenderParams, select_recommendations};
pub use score::{ConfidenceLevel, SpecialtyScore};
pub use similarity::{Overlap, SimilarityWeights};
