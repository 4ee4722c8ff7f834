//! Application layer for nl2sparql
//!
//! This crate contains the pipeline orchestrator, port definitions, and
//! pipeline parameters. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::PipelineParams;
pub use ports::{
    endpoint::{EndpointError, SparqlEndpoint},
    generation::{GenerationError, GenerationGateway},
    linker::{EntityLinker, NoEntityLinker},
    progress::{NoPipelineProgress, PipelineProgress},
};
pub use use_cases::answer_question::AnswerQuestionUseCase;
