//! Validation of raw model output: RECEIVED text is fence-stripped and
//! PARSED as JSON, then VALIDATED against the fixed shape of each flow.
//! Either step failing is terminal for the request; nothing invalid is
//! ever cached or soft-defaulted.

use shared::{FaceAnalysis, FitnessAnalysis};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("model response was not valid JSON: {0}")]
    Parse(String),
    #[error("{0}")]
    InvalidSubject(String),
    #[error("model response missing required field `{0}`")]
    MissingField(&'static str),
}

pub const DEFAULT_FACE_REJECTION: &str =
    "The AI could not detect a clear human face. Please upload a well-lit, front-facing selfie.";

pub const DEFAULT_BODY_REJECTION: &str = "The AI could not detect a clear full-body human subject. Please stand back and ensure you are fully visible.";

/// Models occasionally wrap JSON-mode output in Markdown code fences even
/// when told not to; strip them before parsing.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

fn parse_json(raw: &str) -> Result<serde_json::Value, ValidationError> {
    serde_json::from_str(strip_code_fences(raw)).map_err(|e| ValidationError::Parse(e.to_string()))
}

pub fn parse_face_analysis(raw: &str) -> Result<FaceAnalysis, ValidationError> {
    let value = parse_json(raw)?;

    if value.get("isValid").and_then(|v| v.as_bool()) == Some(false) {
        let message = value
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_FACE_REJECTION);
        return Err(ValidationError::InvalidSubject(message.to_string()));
    }

    if value.get("detailedScores").is_none_or(|v| !v.is_object()) {
        return Err(ValidationError::MissingField("detailedScores"));
    }

    serde_json::from_value(value).map_err(|e| ValidationError::Parse(e.to_string()))
}

pub fn parse_fitness_analysis(raw: &str) -> Result<FitnessAnalysis, ValidationError> {
    let value = parse_json(raw)?;

    if value.get("valid").and_then(|v| v.as_bool()) == Some(false) {
        return Err(ValidationError::InvalidSubject(
            DEFAULT_BODY_REJECTION.to_string(),
        ));
    }

    if value.get("workout_items").is_none_or(|v| !v.is_array()) {
        return Err(ValidationError::MissingField("workout_items"));
    }
    if value
        .get("dietary_recommendations")
        .is_none_or(|v| !v.is_array())
    {
        return Err(ValidationError::MissingField("dietary_recommendations"));
    }

    serde_json::from_value(value).map_err(|e| ValidationError::Parse(e.to_string()))
}
