//! Static schema hints and linked entities.
//!
//! The hint vocabulary grounds the model's output in predicates and
//! classes that actually exist in the target graph.

pub mod entity;
pub mod hints;
