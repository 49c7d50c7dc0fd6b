//! Recommend Specialists use case.

use crate::config::EngineConfig;
use crate::reference::ReferenceStore;
use crate::response::{RecommendationView, ResultAssembler};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use triage_domain::{CaseSimilarityRecommender, DomainError, Recommendation, SymptomSet};

/// Errors that can occur during specialist recommendation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendSpecialistsError {
    #[error("No symptoms provided")]
    EmptyInput,

    #[error("None of the symptoms match the case database")]
    NoMatch { available: Vec<String> },

    #[error("Domain error: {0}")]
    Domain(DomainError),
}

impl From<DomainError> for RecommendSpecialistsError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::EmptyInput => RecommendSpecialistsError::EmptyInput,
            DomainError::NoMatch { available } => RecommendSpecialistsError::NoMatch { available },
            other => RecommendSpecialistsError::Domain(other),
        }
    }
}

impl RecommendSpecialistsError {
    /// Sample of valid symptom names, for diagnostic display
    pub fn available_symptoms(&self) -> &[String] {
        match self {
            RecommendSpecialistsError::NoMatch { available } => available,
            _ => &[],
        }
    }
}

/// Input for the [`RecommendSpecialistsUseCase`].
#[derive(Debug, Clone)]
pub struct RecommendSpecialistsInput {
    pub symptoms: Vec<String>,
    /// Overrides the configured `top_n`
    pub top_n: Option<usize>,
}

impl RecommendSpecialistsInput {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            top_n: None,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }
}

#[derive(Debug, Clone)]
pub struct RecommendSpecialistsOutput {
    pub active_symptoms: SymptomSet,
    pub recommendation: Recommendation,
    pub view: RecommendationView,
}

/// Use case for scoring specialists against the case database.
#[derive(Debug, Clone)]
pub struct RecommendSpecialistsUseCase {
    store: Arc<ReferenceStore>,
    config: EngineConfig,
}

impl RecommendSpecialistsUseCase {
    pub fn new(store: Arc<ReferenceStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    pub fn execute(
        &self,
        input: RecommendSpecialistsInput,
    ) -> Result<RecommendSpecialistsOutput, RecommendSpecialistsError> {
        if input.symptoms.is_empty() {
            return Err(RecommendSpecialistsError::EmptyInput);
        }

        let data = self.store.snapshot();
        let active = data.normalizer.normalize_all(&input.symptoms);
        let top_n = input.top_n.unwrap_or(self.config.top_n);

        let recommendation = CaseSimilarityRecommender::new(&data.cases)
            .with_params(self.config.recommender)
            .recommend(&active, top_n)
            .inspect_err(|e| warn!("Recommendation failed: {}", e))?;

        info!(
            "Recommended {} specialists (threshold {:.1})",
            recommendation.recommendations.len(),
            recommendation.confidence_threshold
        );

        let view = ResultAssembler::new(self.config.recommender.base_confidence).recommendation(&recommendation);
        Ok(RecommendSpecialistsOutput {
            active_symptoms: active,
            recommendation,
            view,
        })
    }
}
