//! Infrastructure layer for nl2sparql
//!
//! Adapters for the external services the pipeline depends on — the
//! generation provider, the SPARQL endpoint, the entity linker — plus
//! configuration loading.

pub mod config;
pub mod endpoint;
pub mod linker;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use endpoint::HttpSparqlEndpoint;
pub use linker::SpotlightLinker;
pub use providers::GroqGenerator;
