//! SPARQL query handling: prefixes, extraction/repair, and result parsing.
//!
//! Everything here is pure and deterministic — no network access. The
//! extractor is the trust boundary between free-form model output and the
//! endpoint executor.

pub mod extract;
pub mod prefixes;
pub mod query;
pub mod results;
