use std::sync::Arc;

use log::info;
use shared::{BioProfile, FaceAnalysis, FitnessAnalysis};

use crate::analysis::validate::{self, ValidationError};
use crate::cache::cache_service::{CacheError, CacheService};
use crate::config::ModelConfig;
use crate::fingerprint::fingerprint;
use crate::model::groq::{ModelError, VisionModel};
use crate::model::prompt;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidSubject(String),
    #[error("model returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Provider(#[from] ModelError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<ValidationError> for AnalysisError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidSubject(message) => AnalysisError::InvalidSubject(message),
            other => AnalysisError::MalformedResponse(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    cache: CacheService,
    model: Arc<dyn VisionModel>,
    models: ModelConfig,
}

impl AnalysisService {
    pub fn new(cache: CacheService, model: Arc<dyn VisionModel>, models: ModelConfig) -> Self {
        Self {
            cache,
            model,
            models,
        }
    }

    /// Selfie flow: fingerprint, cache lookup, remote call on miss,
    /// validation, cache write. At most one outbound model call per
    /// request; a cache hit short-circuits the remote call entirely.
    pub async fn analyze_face(
        &self,
        image_data: &[u8],
        mime_type: &str,
    ) -> Result<FaceAnalysis, AnalysisError> {
        let image_hash = fingerprint(image_data);

        if let Some(cached) = self.cache.lookup(&image_hash).await? {
            info!("Cache hit for {}", &image_hash[..12]);
            return Ok(cached);
        }

        let prompt = prompt::face_analysis_prompt(&self.models.analysis_model);
        let raw = self
            .model
            .analyze_image(&prompt, image_data, mime_type)
            .await?;
        let analysis = validate::parse_face_analysis(&raw)?;

        self.cache.store(&image_hash, &analysis).await?;
        info!("Stored analysis for {}", &image_hash[..12]);
        Ok(analysis)
    }

    /// Fitness flow: uncached. The resulting plan depends on the bio
    /// profile, not on image content alone, so the image fingerprint is
    /// not a sound cache key here.
    pub async fn analyze_fitness(
        &self,
        image_data: &[u8],
        mime_type: &str,
        bio: Option<&BioProfile>,
    ) -> Result<FitnessAnalysis, AnalysisError> {
        let prompt = prompt::fitness_prompt(&self.models.fitness_model, bio);
        let raw = self
            .model
            .analyze_image(&prompt, image_data, mime_type)
            .await?;
        Ok(validate::parse_fitness_analysis(&raw)?)
    }
}
