//! Test doubles for the two external collaborators: the hosted vision
//! model and the analysis document store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::analysis::service::AnalysisService;
use crate::cache::cache_service::CacheService;
use crate::cache::models::CachedAnalysisRecord;
use crate::config::ModelConfig;
use crate::db::dynamodb_repository::{AnalysisStore, RepositoryError};
use crate::model::groq::{ModelError, VisionModel, VisionPrompt};

pub const FACE_PAYLOAD: &str = r#"{
    "isValid": true,
    "score": 78,
    "detailedScores": {"jawline": 85, "skin": 74, "masculinity": 82, "cheekbones": 77, "hair": 70},
    "roadmap": [
        {"category": "Skincare", "suggestion": "Daily SPF and a retinoid at night."},
        {"category": "Hair", "suggestion": "Shorter sides with a textured top."},
        {"category": "Jawline", "suggestion": "Drop body fat to 15% for definition."},
        {"category": "Posture", "suggestion": "Chin tucks and thoracic extension work."},
        {"category": "Sleep", "suggestion": "7.5 hours minimum, consistent schedule."},
        {"category": "Grooming", "suggestion": "Keep brows tidy and beard line crisp."}
    ],
    "summary": "Strong base with room to refine skin quality and hair styling."
}"#;

/// Scripted stand-in for the hosted model; counts outbound calls so tests
/// can assert the one-call-per-miss policy.
pub struct FakeModel {
    response: Result<String, ModelError>,
    calls: AtomicUsize,
}

impl FakeModel {
    pub fn returning(raw: &str) -> Self {
        Self {
            response: Ok(raw.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: ModelError) -> Self {
        Self {
            response: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl VisionModel for FakeModel {
    async fn analyze_image(
        &self,
        _prompt: &VisionPrompt,
        _image_data: &[u8],
        _mime_type: &str,
    ) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}

/// In-memory analysis table keyed by fingerprint.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, CachedAnalysisRecord>>,
}

impl MemoryStore {
    pub async fn insert(&self, record: CachedAnalysisRecord) {
        self.records
            .lock()
            .await
            .insert(record.image_hash.clone(), record);
    }

    pub async fn record(&self, image_hash: &str) -> Option<CachedAnalysisRecord> {
        self.records.lock().await.get(image_hash).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn get_analysis(
        &self,
        image_hash: &str,
    ) -> Result<Option<CachedAnalysisRecord>, RepositoryError> {
        Ok(self.records.lock().await.get(image_hash).cloned())
    }

    async fn put_analysis(&self, record: &CachedAnalysisRecord) -> Result<(), RepositoryError> {
        self.records
            .lock()
            .await
            .insert(record.image_hash.clone(), record.clone());
        Ok(())
    }
}

pub fn service_with(model: Arc<FakeModel>, store: Arc<MemoryStore>) -> AnalysisService {
    AnalysisService::new(
        CacheService::new(store),
        model,
        ModelConfig {
            analysis_model: "test-analysis-model".to_string(),
            fitness_model: "test-fitness-model".to_string(),
        },
    )
}
