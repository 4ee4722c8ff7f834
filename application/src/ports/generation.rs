//! Generation gateway port
//!
//! Defines the interface for the generative-model capability.
//! Implementations (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use nl2sparql_domain::PromptRequest;
use thiserror::Error;

/// Errors from a single generation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The provider did not answer within the configured timeout.
    #[error("Generation timed out")]
    Timeout,

    /// Non-2xx or otherwise unusable response from the provider.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A response arrived but contained no extractable text.
    #[error("Provider returned an empty response")]
    EmptyOutput,
}

/// Gateway to the generative-model capability.
///
/// One call here means exactly one outbound provider request.
/// Implementations enforce their configured timeout themselves (the
/// provider is not trusted to respect deadlines) and must not retry
/// internally — retry policy belongs to the orchestrator, where the
/// attempt bound stays auditable.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Send the prompt and return the raw generated text.
    async fn generate(&self, prompt: &PromptRequest) -> Result<String, GenerationError>;
}
