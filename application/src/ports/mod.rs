//! Ports — interfaces the application layer depends on.
//!
//! Adapters implementing these live in the infrastructure layer;
//! front-end observers live in the presentation layer.

pub mod endpoint;
pub mod generation;
pub mod linker;
pub mod progress;
