//! Answer value object — the pipeline's only output.
//!
//! Every pipeline run resolves to an [`Answer`], including failed runs.
//! The three outcomes the front-ends must be able to distinguish:
//!
//! - a concrete factual answer ([`AnswerKind::Fact`])
//! - "the query ran but matched nothing" ([`AnswerKind::NoResult`])
//! - "the pipeline itself failed" ([`AnswerKind::Failure`])

use serde::{Deserialize, Serialize};

/// Why a pipeline run failed.
///
/// The user-visible text for each variant is a stable message that never
/// echoes raw provider or endpoint error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The input question was empty after trimming.
    EmptyQuestion,
    /// All generation attempts were consumed without an executable query.
    GenerationExhausted,
    /// The endpoint did not respond within the configured timeout.
    EndpointTimeout,
    /// The endpoint could not be reached (DNS, refused, reset).
    EndpointUnreachable,
    /// The endpoint returned 200 but the body was not a result set.
    MalformedResponse,
    /// The run was cancelled before completing.
    Cancelled,
}

impl FailureKind {
    /// Stable, user-safe message for this failure.
    pub fn message(&self) -> &'static str {
        match self {
            FailureKind::EmptyQuestion => "Please ask a non-empty question.",
            FailureKind::GenerationExhausted => {
                "I could not build a working query for that question. Try rephrasing it."
            }
            FailureKind::EndpointTimeout => {
                "The knowledge graph took too long to respond. Please try again."
            }
            FailureKind::EndpointUnreachable => {
                "The knowledge graph is unreachable right now. Please try again later."
            }
            FailureKind::MalformedResponse => {
                "The knowledge graph returned an unexpected response. Please try again."
            }
            FailureKind::Cancelled => "The question was cancelled.",
        }
    }
}

/// Outcome category of an [`Answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    /// A concrete factual answer derived from result bindings.
    Fact,
    /// The query executed but produced no bindings.
    NoResult,
    /// The pipeline failed before an answer could be produced.
    Failure(FailureKind),
}

/// Final text surfaced to the caller, tagged with its outcome category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    text: String,
    kind: AnswerKind,
}

impl Answer {
    /// A factual answer with the given text.
    pub fn fact(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: AnswerKind::Fact,
        }
    }

    /// The explicit "no answer found" outcome. Not a failure.
    pub fn no_result() -> Self {
        Self {
            text: "No answer found in the knowledge graph.".to_string(),
            kind: AnswerKind::NoResult,
        }
    }

    /// A failure outcome carrying the stable message for `kind`.
    pub fn failure(kind: FailureKind) -> Self {
        Self {
            text: kind.message().to_string(),
            kind: AnswerKind::Failure(kind),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> AnswerKind {
        self.kind
    }

    pub fn is_fact(&self) -> bool {
        matches!(self.kind, AnswerKind::Fact)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.kind, AnswerKind::Failure(_))
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
