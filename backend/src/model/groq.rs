use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde_json::json;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// One deterministic instruction to the hosted model. Construction is
/// pure; the same inputs always produce the same request.
#[derive(Debug, Clone, PartialEq)]
pub struct VisionPrompt {
    pub model: String,
    pub system: Option<String>,
    pub instruction: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Transport(String),
    #[error("model provider returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("model response contained no content")]
    EmptyResponse,
}

/// The opaque remote analysis capability: `(prompt, image) -> raw text`.
/// All "intelligence" lives behind this seam, so the pipeline around it
/// is testable against a substitutable fake.
#[async_trait]
pub trait VisionModel: Send + Sync {
    async fn analyze_image(
        &self,
        prompt: &VisionPrompt,
        image_data: &[u8],
        mime_type: &str,
    ) -> Result<String, ModelError>;
}

pub struct GroqClient {
    http: Client,
    api_key: String,
    api_url: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to construct HTTP client"),
            api_key,
            api_url: GROQ_API_URL.to_string(),
        }
    }

    fn request_body(
        prompt: &VisionPrompt,
        image_data: &[u8],
        mime_type: &str,
    ) -> serde_json::Value {
        let base64_image = general_purpose::STANDARD.encode(image_data);

        let mut messages = Vec::new();
        if let Some(system) = &prompt.system {
            messages.push(json!({
                "role": "system",
                "content": system
            }));
        }
        messages.push(json!({
            "role": "user",
            "content": [
                {
                    "type": "text",
                    "text": prompt.instruction
                },
                {
                    "type": "image_url",
                    "image_url": {
                        "url": format!("data:{};base64,{}", mime_type, base64_image)
                    }
                }
            ]
        }));

        json!({
            "model": prompt.model,
            "messages": messages,
            "response_format": { "type": "json_object" },
            "temperature": prompt.temperature
        })
    }
}

#[async_trait]
impl VisionModel for GroqClient {
    /// Exactly one outbound call; transient provider errors surface to the
    /// caller instead of being retried here.
    async fn analyze_image(
        &self,
        prompt: &VisionPrompt,
        image_data: &[u8],
        mime_type: &str,
    ) -> Result<String, ModelError> {
        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&Self::request_body(prompt, image_data, mime_type))
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        result["choices"][0]["message"]["content"]
            .as_str()
            .map(ToOwned::to_owned)
            .ok_or(ModelError::EmptyResponse)
    }
}
