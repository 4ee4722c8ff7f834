//! Answer reduction: result bindings → final answer text.
//!
//! Pure domain logic. Multi-row results surface every distinct value of
//! the first bound variable rather than picking one — recall over
//! precision. Empty results become the explicit no-answer outcome, never
//! a failure.

use crate::core::answer::Answer;
use crate::core::question::Question;
use crate::sparql::results::SparqlResults;

/// Reduce a successful result set to an [`Answer`].
///
/// The question is accepted for symmetry with the rest of the pipeline;
/// current reduction is purely value-based.
pub fn reduce(_question: &Question, results: &SparqlResults) -> Answer {
    // ASK queries carry their answer in the boolean field
    if let Some(boolean) = results.boolean {
        return Answer::fact(if boolean { "Yes." } else { "No." });
    }

    if results.rows.is_empty() {
        return Answer::no_result();
    }

    let var = match results.first_bound_var() {
        Some(var) => var.to_string(),
        None => return Answer::no_result(),
    };

    let mut values: Vec<String> = Vec::new();
    for row in &results.rows {
        if let Some(term) = row.get(&var) {
            let label = term.display_label();
            if !label.is_empty() && !values.contains(&label) {
                values.push(label);
            }
        }
    }

    if values.is_empty() {
        return Answer::no_result();
    }

    Answer::fact(join_values(&values))
}

/// Join distinct values into one sentence: "A", "A and B", "A, B and C".
fn join_values(values: &[String]) -> String {
    match values {
        [single] => single.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
        [] => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sparql::results::{BindingRow, RdfTerm};

    fn question() -> Question {
        Question::new("Who directed Inception?")
    }

    fn uri_row(var: &str, uri: &str) -> BindingRow {
        let mut row = BindingRow::new();
        row.insert(var.to_string(), RdfTerm::Uri(uri.to_string()));
        row
    }

    #[test]
    fn test_empty_results_is_no_answer_not_failure() {
        let results = SparqlResults {
            vars: vec!["director".to_string()],
            rows: vec![],
            boolean: None,
        };
        let answer = reduce(&question(), &results);
        assert!(!answer.is_failure());
        assert!(!answer.is_fact());
    }

    #[test]
    fn test_single_row_answer() {
        let results = SparqlResults {
            vars: vec!["director".to_string()],
            rows: vec![uri_row(
                "director",
                "http://dbpedia.org/resource/Christopher_Nolan",
            )],
            boolean: None,
        };
        let answer = reduce(&question(), &results);
        assert!(answer.is_fact());
        assert!(answer.text().contains("Christopher Nolan"));
    }

    #[test]
    fn test_multi_row_concatenates_distinct_values() {
        let results = SparqlResults {
            vars: vec!["actor".to_string()],
            rows: vec![
                uri_row("actor", "http://dbpedia.org/resource/Leonardo_DiCaprio"),
                uri_row("actor", "http://dbpedia.org/resource/Elliot_Page"),
                // duplicate must be dropped
                uri_row("actor", "http://dbpedia.org/resource/Leonardo_DiCaprio"),
            ],
            boolean: None,
        };
        let answer = reduce(&Question::new("Who starred in Inception?"), &results);
        assert_eq!(answer.text(), "Leonardo DiCaprio and Elliot Page");
    }

    #[test]
    fn test_first_bound_variable_wins() {
        let mut row = BindingRow::new();
        row.insert(
            "name".to_string(),
            RdfTerm::Literal {
                value: "Christopher Nolan".to_string(),
                lang: Some("en".to_string()),
                datatype: None,
            },
        );
        let results = SparqlResults {
            // "director" is declared first but never bound
            vars: vec!["director".to_string(), "name".to_string()],
            rows: vec![row],
            boolean: None,
        };
        let answer = reduce(&question(), &results);
        assert_eq!(answer.text(), "Christopher Nolan");
    }

    #[test]
    fn test_ask_boolean_reduces_to_yes_no() {
        let results = SparqlResults {
            vars: vec![],
            rows: vec![],
            boolean: Some(true),
        };
        let answer = reduce(&Question::new("Is Berlin in Germany?"), &results);
        assert_eq!(answer.text(), "Yes.");
    }
}
