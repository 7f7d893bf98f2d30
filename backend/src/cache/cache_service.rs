use std::sync::Arc;

use log::{info, warn};
use shared::FaceAnalysis;

use crate::cache::models::CachedAnalysisRecord;
use crate::db::dynamodb_repository::{AnalysisStore, RepositoryError};

#[derive(Clone)]
pub struct CacheService {
    repo: Arc<dyn AnalysisStore>,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl CacheService {
    pub fn new(repo: Arc<dyn AnalysisStore>) -> Self {
        Self { repo }
    }

    /// Returns a hit only for records carrying the current schema version
    /// and a complete sub-metric mapping. The record format has evolved
    /// over time, so reads are schema-checked rather than blindly trusted;
    /// a stale or undecodable record counts as a miss and the caller
    /// re-analyzes. Store unavailability still propagates as an error.
    pub async fn lookup(&self, image_hash: &str) -> Result<Option<FaceAnalysis>, CacheError> {
        let record = match self.repo.get_analysis(image_hash).await {
            Ok(record) => record,
            Err(RepositoryError::InvalidData(reason)) => {
                warn!(
                    "Undecodable cache record for {}: {}; re-analyzing",
                    image_hash, reason
                );
                None
            }
            Err(e) => return Err(e.into()),
        };

        match record {
            None => Ok(None),
            Some(record) if !record.is_current_schema() => {
                info!(
                    "Cache record for {} predates schema v{}; re-analyzing",
                    image_hash,
                    crate::cache::models::ANALYSIS_SCHEMA_VERSION
                );
                Ok(None)
            }
            Some(record) => Ok(record.to_analysis()),
        }
    }

    /// Normalizes a validated analysis (timestamp, fingerprint, schema
    /// version, duplicated metrics) and persists it. Plain put: concurrent
    /// writers of the same fingerprint are last-write-wins, which is
    /// acceptable since their content is identical.
    pub async fn store(
        &self,
        image_hash: &str,
        analysis: &FaceAnalysis,
    ) -> Result<CachedAnalysisRecord, CacheError> {
        let record = CachedAnalysisRecord::from_analysis(image_hash.to_string(), analysis);
        self.repo.put_analysis(&record).await?;
        Ok(record)
    }
}
