//! Engine configuration container.
//!
//! [`EngineConfig`] groups the tunables of both scoring components plus the
//! default result sizes. Use cases receive it by value at construction time;
//! it is never mutated afterwards.

use serde::{Deserialize, Serialize};
use triage_domain::{DomainError, RecommenderParams, ResolverParams};

/// Static engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub resolver: ResolverParams,
    pub recommender: RecommenderParams,
    /// Default `maxResults` for disease resolution
    pub max_results: usize,
    /// Default `topN` for specialist recommendation
    pub top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverParams::default(),
            recommender: RecommenderParams::default(),
            max_results: 3,
            top_n: 5,
        }
    }
}

impl EngineConfig {
    // ==================== Builder Methods ====================

    pub fn with_resolver(mut self, params: ResolverParams) -> Self {
        self.resolver = params;
        self
    }

    pub fn with_recommender(mut self, params: RecommenderParams) -> Self {
        self.recommender = params;
        self
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    // ==================== Validation ====================

    pub fn validate(&self) -> Result<(), DomainError> {
        self.resolver.validate()?;
        self.recommender.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_results, 3);
        assert_eq!(config.top_n, 5);
        assert_eq!(config.resolver.max_combo_size, 4);
        assert_eq!(config.recommender.base_confidence, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_resolver() {
        let config = EngineConfig::default().with_resolver(ResolverParams {
            confidence_cap: 1.5,
            ..ResolverParams::default()
        });
        assert!(config.validate().is_err());
    }
}
