//! Pipeline parameters — orchestrator loop control.
//!
//! [`PipelineParams`] groups the named knobs that bound cost and latency
//! per question. They are immutable for the lifetime of a use case, so
//! concurrent runs and tests can hold distinct configurations safely.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry and repair-loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineParams {
    /// Maximum generation calls per question (regenerations included).
    pub max_generation_attempts: u32,
    /// Same-query retries after a transport failure (0 = fail immediately).
    pub transport_retries: u32,
    /// Base backoff before a transport retry; doubles each retry.
    pub retry_backoff: Duration,
    /// LIMIT injected into SELECT queries that have none.
    pub default_select_limit: u32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            max_generation_attempts: 2,
            transport_retries: 1,
            retry_backoff: Duration::from_millis(500),
            default_select_limit: 50,
        }
    }
}

impl PipelineParams {
    // ==================== Builder Methods ====================

    pub fn with_max_generation_attempts(mut self, max: u32) -> Self {
        self.max_generation_attempts = max;
        self
    }

    pub fn with_transport_retries(mut self, retries: u32) -> Self {
        self.transport_retries = retries;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn with_default_select_limit(mut self, limit: u32) -> Self {
        self.default_select_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = PipelineParams::default();
        assert_eq!(params.max_generation_attempts, 2);
        assert_eq!(params.transport_retries, 1);
        assert_eq!(params.default_select_limit, 50);
    }

    #[test]
    fn test_builder() {
        let params = PipelineParams::default()
            .with_max_generation_attempts(3)
            .with_transport_retries(0)
            .with_retry_backoff(Duration::from_millis(10));

        assert_eq!(params.max_generation_attempts, 3);
        assert_eq!(params.transport_retries, 0);
        assert_eq!(params.retry_backoff, Duration::from_millis(10));
    }
}
