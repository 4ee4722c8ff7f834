//! Pipeline progress port
//!
//! Stage callbacks for front-ends that want to show what the pipeline is
//! doing. All methods default to no-ops so implementations only override
//! what they display.

/// Observer for pipeline stage transitions.
pub trait PipelineProgress: Send + Sync {
    /// Entity linking finished with `count` linked entities.
    fn on_entities_linked(&self, _count: usize) {}

    /// A generation attempt is starting (1-based, out of `max`).
    fn on_generation_attempt(&self, _attempt: u32, _max: u32) {}

    /// A candidate query passed validation. `repaired` is true when
    /// deterministic fixes were applied.
    fn on_query_ready(&self, _query: &str, _repaired: bool) {}

    /// A transport failure triggered a same-query retry (1-based).
    fn on_transport_retry(&self, _retry: u32, _max: u32) {}
}

/// Null implementation — ignores all progress.
pub struct NoPipelineProgress;

impl PipelineProgress for NoPipelineProgress {}
