//! Domain layer for nl2sparql
//!
//! This crate contains the pipeline's core types and all deterministic
//! logic: question/answer value objects, the query extractor and repair
//! pass, schema hints, prompt templates, the result bindings model, and
//! answer reduction. It performs no I/O and has no dependencies on
//! infrastructure or presentation concerns.

pub mod core;
pub mod prompt;
pub mod reduce;
pub mod schema;
pub mod sparql;

// Re-export commonly used types
pub use core::{
    answer::{Answer, AnswerKind, FailureKind},
    error::DomainError,
    question::Question,
};
pub use prompt::{PromptBuilder, PromptRequest, template::PromptTemplate};
pub use reduce::reduce;
pub use schema::{
    entity::LinkedEntity,
    hints::{SchemaHint, VocabularyItem},
};
pub use sparql::{
    extract::QueryExtractor,
    prefixes::uri_to_prefixed,
    query::{CandidateQuery, InvalidReason},
    results::{BindingRow, RdfTerm, ResultsParseError, SparqlResults},
};
