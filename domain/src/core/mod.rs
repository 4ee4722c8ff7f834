//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`] — a validated natural-language question
//! - [`answer::Answer`] — the tagged final answer surfaced to callers
//! - [`error::DomainError`] — domain-level errors

pub mod answer;
pub mod error;
pub mod question;
