use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{FaceAnalysis, FacialScores, RoadmapStep};
use uuid::Uuid;

/// Version tag written with every stored analysis. v1 records predate the
/// detailed sub-metric mapping; readers must treat anything but the
/// current version as stale and re-analyze.
pub const ANALYSIS_SCHEMA_VERSION: u32 = 2;

/// One persisted analysis, keyed by the content fingerprint of the image
/// it was computed from. Immutable once written: a later request for the
/// same fingerprint reads the existing record instead of overwriting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAnalysisRecord {
    pub id: Uuid,
    pub image_hash: String,
    pub schema_version: u32,
    pub score: u8,
    /// Absent on legacy records written before the sub-metric mapping.
    pub detailed_scores: Option<FacialScores>,
    pub roadmap: Vec<RoadmapStep>,
    pub summary: String,
    /// Raw sub-metric mapping duplicated alongside the result for querying.
    pub metrics: Option<FacialScores>,
    pub created_at: DateTime<Utc>,
}

impl CachedAnalysisRecord {
    pub fn from_analysis(image_hash: String, analysis: &FaceAnalysis) -> Self {
        Self {
            id: Uuid::new_v4(),
            image_hash,
            schema_version: ANALYSIS_SCHEMA_VERSION,
            score: analysis.score,
            detailed_scores: Some(analysis.detailed_scores.clone()),
            roadmap: analysis.roadmap.clone(),
            summary: analysis.summary.clone(),
            metrics: Some(analysis.detailed_scores.clone()),
            created_at: Utc::now(),
        }
    }

    /// Whether this record carries the current schema and a complete
    /// sub-metric mapping. Anything else must be re-analyzed.
    pub fn is_current_schema(&self) -> bool {
        self.schema_version == ANALYSIS_SCHEMA_VERSION && self.detailed_scores.is_some()
    }

    pub fn to_analysis(&self) -> Option<FaceAnalysis> {
        let detailed_scores = self.detailed_scores.clone()?;
        Some(FaceAnalysis {
            score: self.score,
            detailed_scores,
            roadmap: self.roadmap.clone(),
            summary: self.summary.clone(),
        })
    }
}
