//! Assess Symptoms use case.
//!
//! Runs the disease resolver and the specialist recommender on the same
//! normalised input and assembles one combined report. Both components read
//! the same reference snapshot.

use crate::config::EngineConfig;
use crate::reference::ReferenceStore;
use crate::response::{AssessmentReport, ResultAssembler};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use triage_domain::{CaseSimilarityRecommender, CombinatorialDiseaseResolver, DomainError};

/// Errors that can occur during assessment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessSymptomsError {
    #[error("No symptoms provided")]
    EmptyInput,

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Input for the [`AssessSymptomsUseCase`].
#[derive(Debug, Clone)]
pub struct AssessSymptomsInput {
    pub symptoms: Vec<String>,
    pub max_results: Option<usize>,
    pub top_n: Option<usize>,
}

impl AssessSymptomsInput {
    pub fn new<I, S>(symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            symptoms: symptoms.into_iter().map(Into::into).collect(),
            max_results: None,
            top_n: None,
        }
    }

    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }
}

/// Use case producing the combined diagnosis + specialist report.
#[derive(Debug, Clone)]
pub struct AssessSymptomsUseCase {
    store: Arc<ReferenceStore>,
    config: EngineConfig,
}

impl AssessSymptomsUseCase {
    pub fn new(store: Arc<ReferenceStore>, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// A case-database no-match leaves `specialists` empty in the report
    /// instead of failing the whole assessment.
    pub fn execute(&self, input: AssessSymptomsInput) -> Result<AssessmentReport, AssessSymptomsError> {
        let data = self.store.snapshot();
        let active = data.normalizer.normalize_all(&input.symptoms);
        if active.is_empty() {
            return Err(AssessSymptomsError::EmptyInput);
        }

        let candidates = CombinatorialDiseaseResolver::new(&data.knowledge)
            .with_params(self.config.resolver)
            .resolve(&active, input.max_results.unwrap_or(self.config.max_results));

        let recommendation = match CaseSimilarityRecommender::new(&data.cases)
            .with_params(self.config.recommender)
            .recommend(&active, input.top_n.unwrap_or(self.config.top_n))
        {
            Ok(recommendation) => Some(recommendation),
            Err(DomainError::NoMatch { .. }) => {
                debug!("No case-database match; report carries diagnoses only");
                None
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            "Assessment: {} diagnoses, {} specialists",
            candidates.len(),
            recommendation.as_ref().map_or(0, |r| r.recommendations.len())
        );

        Ok(ResultAssembler::new(self.config.recommender.base_confidence).assessment(
            &active,
            &candidates,
            recommendation.as_ref(),
        ))
    }
}
