//! Prompt construction for the generation stage.

pub mod template;

use crate::core::error::DomainError;
use crate::core::question::Question;
use crate::schema::entity::LinkedEntity;
use crate::schema::hints::SchemaHint;
use serde::{Deserialize, Serialize};
use template::PromptTemplate;

/// An assembled generation request: system instructions plus user content.
///
/// Created fresh per attempt and consumed by the generation gateway; never
/// persisted or shared between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub system: String,
    pub user: String,
}

/// Builds [`PromptRequest`]s from a question plus schema hints.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    select_limit: u32,
}

impl PromptBuilder {
    pub fn new(select_limit: u32) -> Self {
        Self { select_limit }
    }

    /// Assemble the generation request.
    ///
    /// `prior_feedback` carries the reason a previous attempt failed, so a
    /// regeneration can correct the query without re-asking the user.
    pub fn build(
        &self,
        question: &Question,
        hints: &SchemaHint,
        entities: &[LinkedEntity],
        prior_feedback: Option<&str>,
    ) -> PromptRequest {
        PromptRequest {
            system: PromptTemplate::generation_system(self.select_limit),
            user: PromptTemplate::generation_request(question, hints, entities, prior_feedback),
        }
    }

    /// Validate a raw question string and assemble the request.
    pub fn build_from_raw(
        &self,
        question: &str,
        hints: &SchemaHint,
        entities: &[LinkedEntity],
        prior_feedback: Option<&str>,
    ) -> Result<PromptRequest, DomainError> {
        let question = Question::try_new(question).ok_or(DomainError::EmptyQuestion)?;
        Ok(self.build(&question, hints, entities, prior_feedback))
    }
}
