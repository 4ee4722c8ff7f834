//! Console output formatting

use colored::Colorize;
use nl2sparql_domain::{Answer, AnswerKind};

/// Formats answers for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an answer for the terminal, colored by outcome.
    pub fn format(answer: &Answer) -> String {
        match answer.kind() {
            AnswerKind::Fact => answer.text().to_string(),
            AnswerKind::NoResult => answer.text().yellow().to_string(),
            AnswerKind::Failure(_) => answer.text().red().to_string(),
        }
    }

    /// Format an answer as pretty-printed JSON.
    pub fn format_json(answer: &Answer) -> String {
        serde_json::to_string_pretty(answer).unwrap_or_else(|_| answer.text().to_string())
    }
}
