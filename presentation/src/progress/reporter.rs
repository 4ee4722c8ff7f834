//! Console progress reporting
//!
//! Prints a `// stage` line per pipeline transition, with the generated
//! query shown dimmed and indented once it passes validation.

use colored::Colorize;
use nl2sparql_application::PipelineProgress;

/// Prints pipeline stages to stdout
pub struct StageReporter;

impl StageReporter {
    pub fn new() -> Self {
        Self
    }

    fn stage(title: &str) {
        println!("\n{}", format!("// {}", title).cyan().bold());
    }
}

impl Default for StageReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgress for StageReporter {
    fn on_entities_linked(&self, count: usize) {
        if count == 0 {
            Self::stage("Entity linking: (none)");
        } else {
            Self::stage(&format!("Entity linking: {} linked", count));
        }
    }

    fn on_generation_attempt(&self, attempt: u32, max: u32) {
        Self::stage(&format!("Generating SPARQL (attempt {}/{})", attempt, max));
    }

    fn on_query_ready(&self, query: &str, repaired: bool) {
        if repaired {
            Self::stage("Query ready (repaired)");
        } else {
            Self::stage("Query ready");
        }
        for line in query.lines() {
            println!("{}", format!("  {}", line).dimmed());
        }
    }

    fn on_transport_retry(&self, retry: u32, max: u32) {
        Self::stage(&format!("Endpoint retry ({}/{})", retry, max));
    }
}
