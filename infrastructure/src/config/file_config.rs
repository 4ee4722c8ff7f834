//! Configuration file schema.
//!
//! Every field has a default so a bare install works against the public
//! DBpedia endpoint; only the generation API key must come from the
//! environment.

use nl2sparql_application::PipelineParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while resolving runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Generation API key not found: set {0} or [generation].api_key")]
    MissingApiKey(String),

    #[error("Configuration error: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Generation provider settings (`[generation]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGenerationConfig {
    /// Environment variable holding the API key (default: "GROQ_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended — use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI-compatible API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature — low, we want syntax, not creativity.
    pub temperature: f32,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Timeout for one generation call, in seconds.
    pub timeout_secs: u64,
}

impl Default for FileGenerationConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GROQ_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "openai/gpt-oss-120b".to_string(),
            temperature: 0.1,
            max_tokens: 600,
            timeout_secs: 30,
        }
    }
}

impl FileGenerationConfig {
    /// The API key: explicit value first, then the configured env var.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = &self.api_key {
            let key = key.trim();
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(ConfigError::MissingApiKey(self.api_key_env.clone())),
        }
    }
}

/// Graph endpoint settings (`[endpoint]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEndpointConfig {
    /// SPARQL endpoint URL.
    pub url: String,
    /// Timeout for one query execution, in seconds.
    pub timeout_secs: u64,
}

impl Default for FileEndpointConfig {
    fn default() -> Self {
        Self {
            url: "https://dbpedia.org/sparql".to_string(),
            timeout_secs: 15,
        }
    }
}

/// Entity linker settings (`[linker]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLinkerConfig {
    /// Disable to skip entity linking entirely.
    pub enabled: bool,
    /// Spotlight annotate endpoint.
    pub url: String,
    /// Minimum disambiguation confidence.
    pub confidence: f64,
    /// Minimum entity support (inlink count).
    pub support: i64,
    /// Cap on entities passed to the prompt.
    pub max_entities: usize,
    /// Timeout for one annotate call, in seconds.
    pub timeout_secs: u64,
}

impl Default for FileLinkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "https://api.dbpedia-spotlight.org/en/annotate".to_string(),
            confidence: 0.35,
            support: 20,
            max_entities: 4,
            timeout_secs: 15,
        }
    }
}

/// Pipeline loop settings (`[pipeline]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePipelineConfig {
    /// Maximum generation calls per question.
    pub max_generation_attempts: u32,
    /// Same-query retries after a transport failure.
    pub transport_retries: u32,
    /// Base backoff before a transport retry, in milliseconds.
    pub retry_backoff_ms: u64,
    /// LIMIT injected into SELECT queries that have none.
    pub default_select_limit: u32,
}

impl Default for FilePipelineConfig {
    fn default() -> Self {
        let params = PipelineParams::default();
        Self {
            max_generation_attempts: params.max_generation_attempts,
            transport_retries: params.transport_retries,
            retry_backoff_ms: params.retry_backoff.as_millis() as u64,
            default_select_limit: params.default_select_limit,
        }
    }
}

impl FilePipelineConfig {
    pub fn to_params(&self) -> PipelineParams {
        PipelineParams::default()
            .with_max_generation_attempts(self.max_generation_attempts)
            .with_transport_retries(self.transport_retries)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
            .with_default_select_limit(self.default_select_limit)
    }
}

/// Root configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generation: FileGenerationConfig,
    pub endpoint: FileEndpointConfig,
    pub linker: FileLinkerConfig,
    pub pipeline: FilePipelineConfig,
}
