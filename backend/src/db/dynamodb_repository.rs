use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::cache::models::CachedAnalysisRecord;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid data format: {0}")]
    InvalidData(String),
}

/// Persistence seam for analysis records: a single-document get/put keyed
/// by content fingerprint. DynamoDB in production, an in-memory table in
/// tests.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn get_analysis(
        &self,
        image_hash: &str,
    ) -> Result<Option<CachedAnalysisRecord>, RepositoryError>;

    async fn put_analysis(&self, record: &CachedAnalysisRecord) -> Result<(), RepositoryError>;
}

#[derive(Clone)]
pub struct DynamoDbRepository {
    client: Client,
    analyses_table: String,
}

impl DynamoDbRepository {
    pub fn new(client: Client, analyses_table: String) -> Self {
        Self {
            client,
            analyses_table,
        }
    }

    fn analysis_item(
        record: &CachedAnalysisRecord,
    ) -> Result<HashMap<String, AttributeValue>, RepositoryError> {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S(record.id.to_string()));
        item.insert(
            "image_hash".to_string(),
            AttributeValue::S(record.image_hash.clone()),
        );
        item.insert(
            "schema_version".to_string(),
            AttributeValue::N(record.schema_version.to_string()),
        );
        item.insert(
            "score".to_string(),
            AttributeValue::N(record.score.to_string()),
        );
        if let Some(detailed_scores) = &record.detailed_scores {
            item.insert(
                "detailed_scores".to_string(),
                AttributeValue::S(serde_json::to_string(detailed_scores)?),
            );
        }
        item.insert(
            "roadmap".to_string(),
            AttributeValue::S(serde_json::to_string(&record.roadmap)?),
        );
        item.insert(
            "summary".to_string(),
            AttributeValue::S(record.summary.clone()),
        );
        if let Some(metrics) = &record.metrics {
            item.insert(
                "metrics".to_string(),
                AttributeValue::S(serde_json::to_string(metrics)?),
            );
        }
        item.insert(
            "created_at".to_string(),
            AttributeValue::S(record.created_at.to_rfc3339()),
        );
        Ok(item)
    }

    fn parse_analysis_from_item(
        item: HashMap<String, AttributeValue>,
    ) -> Result<CachedAnalysisRecord, RepositoryError> {
        let id = item
            .get("id")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| RepositoryError::InvalidData("Invalid id".to_string()))?;

        let image_hash = item
            .get("image_hash")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::InvalidData("Invalid image_hash".to_string()))?
            .clone();

        // Records written before the version tag existed count as v1.
        let schema_version = item
            .get("schema_version")
            .and_then(|v| v.as_n().ok())
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(1);

        let score = item
            .get("score")
            .and_then(|v| v.as_n().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .ok_or_else(|| RepositoryError::InvalidData("Invalid score".to_string()))?;

        // Absent on legacy records; the cache layer decides staleness.
        let detailed_scores = item
            .get("detailed_scores")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| serde_json::from_str(s).ok());

        let roadmap = item
            .get("roadmap")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| serde_json::from_str(s).ok())
            .ok_or_else(|| RepositoryError::InvalidData("Invalid roadmap".to_string()))?;

        let summary = item
            .get("summary")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::InvalidData("Invalid summary".to_string()))?
            .clone();

        let metrics = item
            .get("metrics")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| serde_json::from_str(s).ok());

        let created_at = item
            .get("created_at")
            .and_then(|v| v.as_s().ok())
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| RepositoryError::InvalidData("Invalid created_at".to_string()))?;

        Ok(CachedAnalysisRecord {
            id,
            image_hash,
            schema_version,
            score,
            detailed_scores,
            roadmap,
            summary,
            metrics,
            created_at,
        })
    }
}

#[async_trait]
impl AnalysisStore for DynamoDbRepository {
    async fn get_analysis(
        &self,
        image_hash: &str,
    ) -> Result<Option<CachedAnalysisRecord>, RepositoryError> {
        let mut key = HashMap::new();
        key.insert(
            "image_hash".to_string(),
            AttributeValue::S(image_hash.to_string()),
        );

        let result = self
            .client
            .get_item()
            .table_name(&self.analyses_table)
            .set_key(Some(key))
            .send()
            .await
            .map_err(|e| RepositoryError::DynamoDb(e.to_string()))?;

        if let Some(item) = result.item {
            Ok(Some(Self::parse_analysis_from_item(item)?))
        } else {
            Ok(None)
        }
    }

    async fn put_analysis(&self, record: &CachedAnalysisRecord) -> Result<(), RepositoryError> {
        let item = Self::analysis_item(record)?;

        match self
            .client
            .put_item()
            .table_name(&self.analyses_table)
            .set_item(Some(item))
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!(
                    "DynamoDB put_item failed for fingerprint {}: {:?}",
                    record.image_hash,
                    e
                );
                Err(RepositoryError::DynamoDb(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FaceAnalysis, FacialScores, RoadmapStep};

    fn sample_record() -> CachedAnalysisRecord {
        CachedAnalysisRecord::from_analysis(
            "a".repeat(64),
            &FaceAnalysis {
                score: 78,
                detailed_scores: FacialScores {
                    jawline: 85,
                    skin: 74,
                    masculinity: 82,
                    cheekbones: 77,
                    hair: 70,
                },
                roadmap: vec![RoadmapStep {
                    category: "Hair".to_string(),
                    suggestion: "Shorter sides, textured top.".to_string(),
                }],
                summary: "Strong base.".to_string(),
            },
        )
    }

    #[test]
    fn item_mapping_round_trips() {
        let record = sample_record();
        let item = DynamoDbRepository::analysis_item(&record).unwrap();
        let parsed = DynamoDbRepository::parse_analysis_from_item(item).unwrap();

        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.image_hash, record.image_hash);
        assert_eq!(parsed.schema_version, record.schema_version);
        assert_eq!(parsed.score, record.score);
        assert_eq!(parsed.detailed_scores, record.detailed_scores);
        assert_eq!(parsed.roadmap, record.roadmap);
        assert_eq!(parsed.summary, record.summary);
        assert_eq!(parsed.metrics, record.metrics);
        assert_eq!(parsed.created_at.to_rfc3339(), record.created_at.to_rfc3339());
    }

    #[test]
    fn legacy_item_without_version_or_sub_metrics_parses_as_v1() {
        let record = sample_record();
        let mut item = DynamoDbRepository::analysis_item(&record).unwrap();
        item.remove("schema_version");
        item.remove("detailed_scores");
        item.remove("metrics");

        let parsed = DynamoDbRepository::parse_analysis_from_item(item).unwrap();
        assert_eq!(parsed.schema_version, 1);
        assert_eq!(parsed.detailed_scores, None);
        assert!(!parsed.is_current_schema());
    }

    #[test]
    fn corrupt_item_is_invalid_data() {
        let record = sample_record();
        let mut item = DynamoDbRepository::analysis_item(&record).unwrap();
        item.insert("score".to_string(), AttributeValue::S("not-a-number".to_string()));

        let err = DynamoDbRepository::parse_analysis_from_item(item).unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidData(_)));
    }
}
