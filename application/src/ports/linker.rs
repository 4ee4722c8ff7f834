//! Entity linker port
//!
//! Resolves surface forms in the question to knowledge-graph resources.
//! Linking is best-effort: a linker that fails returns an empty list and
//! the pipeline continues without entity anchors.

use async_trait::async_trait;
use nl2sparql_domain::{LinkedEntity, Question};

/// Best-effort entity linking over the question text.
#[async_trait]
pub trait EntityLinker: Send + Sync {
    /// Link surface forms to resources, best-scored first.
    async fn link(&self, question: &Question) -> Vec<LinkedEntity>;
}

/// Null implementation — no linking.
pub struct NoEntityLinker;

#[async_trait]
impl EntityLinker for NoEntityLinker {
    async fn link(&self, _question: &Question) -> Vec<LinkedEntity> {
        Vec::new()
    }
}
