use std::env;

pub const DEFAULT_ANALYSIS_MODEL: &str = "llama-3.2-90b-vision-preview";
pub const DEFAULT_FITNESS_MODEL: &str = "llama-3.2-11b-vision-preview";

/// Process-scoped configuration, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub analyses_table: String,
    pub port: String,
    pub models: ModelConfig,
}

/// Model ids for the two analysis flows.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub analysis_model: String,
    pub fitness_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            groq_api_key: env::var("GROQ_API_KEY").expect("GROQ_API_KEY must be set"),
            analyses_table: env::var("DYNAMODB_ANALYSES_TABLE")
                .unwrap_or_else(|_| "analyses".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "8081".to_string()),
            models: ModelConfig {
                analysis_model: env::var("GROQ_ANALYSIS_MODEL")
                    .unwrap_or_else(|_| DEFAULT_ANALYSIS_MODEL.to_string()),
                fitness_model: env::var("GROQ_FITNESS_MODEL")
                    .unwrap_or_else(|_| DEFAULT_FITNESS_MODEL.to_string()),
            },
        }
    }
}
