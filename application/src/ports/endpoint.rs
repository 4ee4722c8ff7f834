//! SPARQL endpoint port
//!
//! Defines the interface for executing a validated query against the
//! graph endpoint. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use nl2sparql_domain::{FailureKind, SparqlResults};
use thiserror::Error;

/// Errors from a single query execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// Connection refused, DNS failure, reset — the query never ran.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint did not answer within the configured timeout.
    #[error("Endpoint timed out")]
    Timeout,

    /// 4xx/5xx with an endpoint-reported error. The endpoint's grammar
    /// may be stricter than local validation, so this is recoverable by
    /// regenerating the query.
    #[error("Endpoint rejected the query (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// 200 response that does not parse as a result set.
    #[error("Malformed endpoint response: {0}")]
    Malformed(String),
}

impl EndpointError {
    /// Transport failures: the query was plausibly fine, the wire was not.
    /// These are retried as-is, never regenerated.
    pub fn is_transport(&self) -> bool {
        matches!(self, EndpointError::Network(_) | EndpointError::Timeout)
    }

    /// The failure tag a terminal endpoint error surfaces as.
    ///
    /// `Rejected` has no mapping — it feeds the regeneration loop and only
    /// ever surfaces as `GenerationExhausted`.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            EndpointError::Network(_) => FailureKind::EndpointUnreachable,
            EndpointError::Timeout => FailureKind::EndpointTimeout,
            EndpointError::Malformed(_) => FailureKind::MalformedResponse,
            EndpointError::Rejected { .. } => FailureKind::GenerationExhausted,
        }
    }
}

/// Executor for validated SPARQL queries.
///
/// Callers guarantee the query text came out of the extractor as `Raw` or
/// `Repaired` — an `Invalid` candidate never reaches this port.
#[async_trait]
pub trait SparqlEndpoint: Send + Sync {
    /// Execute one query and parse the result set.
    ///
    /// An empty row set is a successful outcome, not an error.
    async fn execute(&self, query: &str) -> Result<SparqlResults, EndpointError>;
}
