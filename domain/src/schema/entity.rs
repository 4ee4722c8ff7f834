//! Linked entity value object.

use serde::{Deserialize, Serialize};

/// A surface form in the question resolved to a knowledge-graph resource.
///
/// Produced by the entity-linking port; consumed by the prompt builder as
/// an "Allowed Entities" anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedEntity {
    /// The text span in the question that was linked.
    pub surface_form: String,
    /// Canonical resource URI.
    pub uri: String,
    /// Comma-separated type hints reported by the linker, may be empty.
    pub types: String,
    /// Linker-reported disambiguation confidence.
    pub similarity_score: f64,
    /// Linker-reported support (inlink count).
    pub support: i64,
}

impl LinkedEntity {
    pub fn new(surface_form: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            surface_form: surface_form.into(),
            uri: uri.into(),
            types: String::new(),
            similarity_score: 0.0,
            support: 0,
        }
    }

    pub fn with_types(mut self, types: impl Into<String>) -> Self {
        self.types = types.into();
        self
    }

    pub fn with_scores(mut self, similarity: f64, support: i64) -> Self {
        self.similarity_score = similarity;
        self.support = support;
        self
    }
}
