//! Candidate query value object.
//!
//! The model's raw output is untrusted text. It only becomes a
//! [`CandidateQuery`] through the extractor, and only the `Raw` and
//! `Repaired` variants may ever reach the endpoint.

use serde::{Deserialize, Serialize};

/// Why extraction/validation gave up on a raw response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// No SELECT/ASK/CONSTRUCT/DESCRIBE form found in the text.
    NoQueryFound,
    /// A query form was found but it does not parse even after repair.
    SyntaxError,
}

impl InvalidReason {
    /// Feedback text handed back to the generator on the next attempt.
    pub fn feedback(&self) -> &'static str {
        match self {
            InvalidReason::NoQueryFound => {
                "The previous response contained no SPARQL query. \
                 Respond with a single SPARQL query and nothing else."
            }
            InvalidReason::SyntaxError => {
                "The previous query had a syntax error (check braces and \
                 triple patterns). Respond with a corrected SPARQL query only."
            }
        }
    }
}

/// A SPARQL query extracted from a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateQuery {
    /// Extracted verbatim and valid as-is.
    Raw(String),
    /// Valid after deterministic repairs were applied.
    Repaired(String),
    /// Unrecoverable — must never be executed.
    Invalid(InvalidReason),
}

impl CandidateQuery {
    /// The executable query text, if there is one.
    pub fn text(&self) -> Option<&str> {
        match self {
            CandidateQuery::Raw(q) | CandidateQuery::Repaired(q) => Some(q),
            CandidateQuery::Invalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, CandidateQuery::Invalid(_))
    }

    pub fn is_repaired(&self) -> bool {
        matches!(self, CandidateQuery::Repaired(_))
    }

    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        match self {
            CandidateQuery::Invalid(reason) => Some(*reason),
            _ => None,
        }
    }
}
