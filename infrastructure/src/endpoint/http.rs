//! SPARQL protocol client.
//!
//! Executes queries over the standard HTTP query protocol: GET with the
//! query as a parameter and `Accept: application/sparql-results+json`.
//! Failure classification follows the endpoint port contract; result
//! parsing is delegated to the domain results model.

use crate::config::file_config::FileEndpointConfig;
use async_trait::async_trait;
use nl2sparql_application::ports::endpoint::{EndpointError, SparqlEndpoint};
use nl2sparql_domain::SparqlResults;
use std::time::Duration;
use tracing::debug;

const RESULTS_JSON: &str = "application/sparql-results+json";

/// How much of an endpoint error body is kept for regeneration feedback.
const MAX_REJECTION_MESSAGE: usize = 300;

/// HTTP adapter for a SPARQL endpoint.
pub struct HttpSparqlEndpoint {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpSparqlEndpoint {
    pub fn new(config: &FileEndpointConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self, query: &str) -> Result<SparqlResults, EndpointError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("query", query)])
            .header("Accept", RESULTS_JSON)
            .header("User-Agent", "nl2sparql/0.1")
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(classify_transport)?;

        if !status.is_success() {
            return Err(EndpointError::Rejected {
                status: status.as_u16(),
                message: truncate(&body, MAX_REJECTION_MESSAGE),
            });
        }

        SparqlResults::from_json(&body)
            .map_err(|e| EndpointError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SparqlEndpoint for HttpSparqlEndpoint {
    async fn execute(&self, query: &str) -> Result<SparqlResults, EndpointError> {
        debug!(endpoint = %self.url, "Executing SPARQL query");
        match tokio::time::timeout(self.timeout, self.request(query)).await {
            Ok(result) => result,
            Err(_) => Err(EndpointError::Timeout),
        }
    }
}

fn classify_transport(err: reqwest::Error) -> EndpointError {
    if err.is_timeout() {
        EndpointError::Timeout
    } else {
        EndpointError::Network(err.to_string())
    }
}

fn truncate(text: &str, max: usize) -> String {
    let trimmed = text.trim();
    if trimmed.len() <= max {
        trimmed.to_string()
    } else {
        let mut end = max;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    }
}
