//! Query extraction and deterministic repair.
//!
//! The model response is untrusted free text: it may wrap the query in
//! prose or code fences, forget prefix declarations, or stop mid-clause.
//! [`QueryExtractor::extract`] isolates the query body, applies repairs in
//! a fixed order, and validates the result. No I/O — identical input
//! always yields identical output.
//!
//! Repair order:
//! 1. declare standard prefixes that are referenced but undeclared
//! 2. balance unmatched `{` / `}`
//! 3. strip trailing commentary after the final `}`
//! 4. append a default `LIMIT` to SELECT queries lacking one (optional)

use super::prefixes::{STANDARD_PREFIXES, declaration};
use super::query::{CandidateQuery, InvalidReason};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// Uppercase only: prose verbs ("ask", "describe") must never start the
// query body, and generated queries spell their form keyword uppercase.
static FORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(SELECT|ASK|CONSTRUCT|DESCRIBE)\b").unwrap());

static PREFIXED_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(dbo|dbr|dbp|rdf|rdfs|foaf|xsd):[A-Za-z_][\w-]*").unwrap()
});

static SELECT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bSELECT\b").unwrap());
static LIMIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").unwrap());

/// Solution modifiers that may legitimately follow the final `}`.
const TRAILING_KEYWORDS: &[&str] = &[
    "ORDER", "GROUP", "HAVING", "LIMIT", "OFFSET", "VALUES", "BY", "ASC", "DESC",
];

/// Extracts and repairs SPARQL queries from raw model output.
#[derive(Debug, Clone, Default)]
pub struct QueryExtractor {
    default_select_limit: Option<u32>,
}

impl QueryExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `LIMIT n` to SELECT queries that have none.
    pub fn with_select_limit(mut self, limit: u32) -> Self {
        self.default_select_limit = Some(limit);
        self
    }

    /// Extract a candidate query from raw model output.
    pub fn extract(&self, raw: &str) -> CandidateQuery {
        let text = strip_code_fences(raw);

        let located = match locate_query(&text) {
            Some(q) => q,
            None => return CandidateQuery::Invalid(InvalidReason::NoQueryFound),
        };

        let mut repaired = ensure_prefixes(&located);
        repaired = balance_braces(&repaired);
        repaired = strip_trailing_commentary(&repaired);
        if let Some(limit) = self.default_select_limit {
            repaired = ensure_select_limit(&repaired, limit);
        }
        let repaired = repaired.trim().to_string();

        if !passes_syntax(&repaired) {
            return CandidateQuery::Invalid(InvalidReason::SyntaxError);
        }

        if repaired == located {
            CandidateQuery::Raw(repaired)
        } else {
            CandidateQuery::Repaired(repaired)
        }
    }
}

/// Remove markdown code fence lines, keeping their content.
fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Find the query body: the first uppercase SELECT/ASK/CONSTRUCT/DESCRIBE
/// keyword, plus any PREFIX declaration lines that precede it.
fn locate_query(text: &str) -> Option<String> {
    let form = FORM_RE.find(text)?;

    let mut prelude = Vec::new();
    for line in text[..form.start()].lines() {
        let trimmed = line.trim();
        if trimmed.to_uppercase().starts_with("PREFIX ") {
            prelude.push(trimmed.to_string());
        }
    }

    let body = text[form.start()..].trim();
    if prelude.is_empty() {
        Some(body.to_string())
    } else {
        Some(format!("{}\n{}", prelude.join("\n"), body))
    }
}

/// Prefixes declared by `PREFIX` lines in the query.
fn declared_prefixes(query: &str) -> BTreeSet<String> {
    let mut declared = BTreeSet::new();
    for line in query.lines() {
        let trimmed = line.trim();
        if trimmed.to_uppercase().starts_with("PREFIX ") {
            if let Some(name) = trimmed.split_whitespace().nth(1) {
                declared.insert(name.trim_end_matches(':').to_string());
            }
        }
    }
    declared
}

/// Prepend declarations for standard prefixes used but not declared.
fn ensure_prefixes(query: &str) -> String {
    let declared = declared_prefixes(query);

    let mut used = BTreeSet::new();
    for line in query.lines() {
        if line.trim().to_uppercase().starts_with("PREFIX ") {
            continue;
        }
        for m in PREFIXED_TOKEN_RE.captures_iter(line) {
            used.insert(m[1].to_string());
        }
    }

    let missing: Vec<String> = STANDARD_PREFIXES
        .iter()
        .filter(|(p, _)| used.contains(*p) && !declared.contains(*p))
        .filter_map(|(p, _)| declaration(p))
        .collect();

    if missing.is_empty() {
        query.to_string()
    } else {
        format!("{}\n{}", missing.join("\n"), query)
    }
}

/// Balance `{` / `}`: append missing closers, truncate at the first
/// closer that would take nesting depth negative.
fn balance_braces(query: &str) -> String {
    let mut depth: i32 = 0;
    for (idx, ch) in query.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return query[..idx].trim_end().to_string();
                }
            }
            _ => {}
        }
    }

    if depth > 0 {
        let mut balanced = query.trim_end().to_string();
        for _ in 0..depth {
            balanced.push_str("\n}");
        }
        balanced
    } else {
        query.to_string()
    }
}

/// Drop text after the final `}` unless it is a solution modifier.
fn strip_trailing_commentary(query: &str) -> String {
    let last_brace = match query.rfind('}') {
        Some(idx) => idx,
        None => return query.to_string(),
    };

    let trailing = &query[last_brace + 1..];
    let mut kept = Vec::new();
    for line in trailing.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let is_modifier = trimmed.split_whitespace().all(|word| {
            let upper = word.to_uppercase();
            TRAILING_KEYWORDS.contains(&upper.as_str())
                || word.chars().all(|c| c.is_ascii_digit())
                || word.starts_with('?')
        });
        if is_modifier {
            kept.push(trimmed.to_string());
        } else {
            break;
        }
    }

    let mut result = query[..=last_brace].to_string();
    for line in kept {
        result.push('\n');
        result.push_str(&line);
    }
    result
}

/// Append `LIMIT n` to SELECT queries without one.
fn ensure_select_limit(query: &str, limit: u32) -> String {
    if SELECT_RE.is_match(query) && !LIMIT_RE.is_match(query) {
        format!("{}\nLIMIT {}", query.trim_end(), limit)
    } else {
        query.to_string()
    }
}

/// Syntactic pass after repair: balanced braces, a query form after the
/// prefix prelude, and a non-empty group pattern where one is required.
fn passes_syntax(query: &str) -> bool {
    // Brace balance (repairs should have guaranteed this)
    let mut depth: i32 = 0;
    for ch in query.chars() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return false;
    }

    // First token after PREFIX lines must be a query form
    let body: Vec<&str> = query
        .lines()
        .filter(|line| !line.trim().to_uppercase().starts_with("PREFIX "))
        .collect();
    let body = body.join("\n");
    let body = body.trim();
    let form = match body.split_whitespace().next() {
        Some(token) => token.to_uppercase(),
        None => return false,
    };
    match form.as_str() {
        "SELECT" | "ASK" | "CONSTRUCT" => {
            // Require a group pattern with at least one triple or constraint
            let open = match body.find('{') {
                Some(idx) => idx,
                None => return false,
            };
            let close = match body.rfind('}') {
                Some(idx) => idx,
                None => return false,
            };
            let group = &body[open + 1..close];
            group.contains('?')
                || group.contains(':')
                || group.contains('<')
                || group.to_uppercase().contains("FILTER")
        }
        // DESCRIBE <uri> is complete without a group pattern
        "DESCRIBE" => body.split_whitespace().nth(1).is_some(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> QueryExtractor {
        QueryExtractor::new()
    }

    #[test]
    fn test_clean_query_is_raw() {
        let raw = "PREFIX dbo: <http://dbpedia.org/ontology/>\n\
                   PREFIX dbr: <http://dbpedia.org/resource/>\n\
                   SELECT ?director WHERE { dbr:Inception dbo:director ?director }";
        let result = extractor().extract(raw);
        assert!(matches!(result, CandidateQuery::Raw(_)));
        assert_eq!(result.text().unwrap(), raw);
    }

    #[test]
    fn test_prose_without_query_is_no_query_found() {
        let result = extractor().extract("I cannot answer that question, sorry.");
        assert_eq!(
            result.invalid_reason(),
            Some(InvalidReason::NoQueryFound)
        );
    }

    #[test]
    fn test_repairs_missing_brace_and_prefix() {
        // The canonical repair case: missing closing brace, undeclared foaf
        let raw = r#"SELECT ?x WHERE { ?x foaf:name "Inception" "#;
        let result = extractor().extract(raw);

        assert!(result.is_repaired(), "expected Repaired, got {:?}", result);
        let text = result.text().unwrap();
        assert!(text.contains("PREFIX foaf: <http://xmlns.com/foaf/0.1/>"));
        assert_eq!(
            text.matches('{').count(),
            text.matches('}').count(),
            "braces must balance after repair"
        );
    }

    #[test]
    fn test_lowercase_prose_verb_does_not_start_the_query() {
        // "ask" in prose must not be mistaken for an ASK query form
        let raw = "Sure, I can ask DBpedia for that:\n\
                   SELECT ?d WHERE { dbr:Inception dbo:director ?d }";
        let result = extractor().extract(raw);
        let text = result.text().unwrap();
        assert!(!text.contains("ask DBpedia"), "prose leaked into query: {text}");
        let body = text
            .lines()
            .find(|line| !line.starts_with("PREFIX"))
            .unwrap();
        assert!(body.starts_with("SELECT"));
    }

    #[test]
    fn test_lowercase_keywords_alone_are_no_query_found() {
        let result = extractor().extract("I would select something and describe it.");
        assert_eq!(result.invalid_reason(), Some(InvalidReason::NoQueryFound));
    }

    #[test]
    fn test_strips_surrounding_prose_and_fences() {
        let raw = "Here is the query you asked for:\n\
                   ```sparql\n\
                   PREFIX dbo: <http://dbpedia.org/ontology/>\n\
                   SELECT ?p WHERE { ?p dbo:director ?d }\n\
                   ```\n\
                   Let me know if you need anything else!";
        let result = extractor().extract(raw);
        let text = result.text().unwrap();
        assert!(text.starts_with("PREFIX dbo:"));
        assert!(!text.contains("Let me know"));
        assert!(!text.contains("```"));
    }

    #[test]
    fn test_keeps_solution_modifiers_after_final_brace() {
        let raw = "SELECT ?city WHERE { ?city a dbo:City }\nORDER BY ?city\nLIMIT 10";
        let result = extractor().extract(raw);
        let text = result.text().unwrap();
        assert!(text.contains("ORDER BY ?city"));
        assert!(text.contains("LIMIT 10"));
    }

    #[test]
    fn test_truncates_extra_closing_brace() {
        let raw = "ASK { dbr:Berlin dbo:country dbr:Germany } }";
        let result = extractor().extract(raw);
        let text = result.text().unwrap();
        assert_eq!(text.matches('{').count(), text.matches('}').count());
    }

    #[test]
    fn test_select_limit_injection() {
        let raw = "SELECT ?d WHERE { dbr:Inception dbo:director ?d }";
        let result = extractor().with_select_limit(50).extract(raw);
        assert!(result.is_repaired());
        assert!(result.text().unwrap().ends_with("LIMIT 50"));
    }

    #[test]
    fn test_select_limit_not_duplicated() {
        let raw = "SELECT ?d WHERE { dbr:Inception dbo:director ?d }\nLIMIT 5";
        let result = QueryExtractor::new().with_select_limit(50).extract(raw);
        let text = result.text().unwrap();
        assert!(text.contains("LIMIT 5"));
        assert!(!text.contains("LIMIT 50"));
    }

    #[test]
    fn test_ask_filter_false_is_valid() {
        let result = extractor().extract("ASK { FILTER(false) }");
        assert!(!result.is_invalid());
    }

    #[test]
    fn test_describe_without_group_is_valid() {
        let result = extractor().extract("DESCRIBE <http://dbpedia.org/resource/Inception>");
        assert!(!result.is_invalid());
    }

    #[test]
    fn test_empty_group_is_syntax_error() {
        let result = extractor().extract("SELECT ?x WHERE {  }");
        assert_eq!(result.invalid_reason(), Some(InvalidReason::SyntaxError));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let inputs = [
            r#"SELECT ?x WHERE { ?x foaf:name "Inception" "#,
            "Sure! ```\nSELECT ?d WHERE { dbr:Inception dbo:director ?d }\n``` Enjoy!",
            "ASK { dbr:Berlin dbo:country dbr:Germany } }",
        ];
        let ex = QueryExtractor::new().with_select_limit(50);
        for input in inputs {
            let once = ex.extract(input);
            let text = once.text().expect("first pass should not be invalid");
            let twice = ex.extract(text);
            assert_eq!(
                twice.text().unwrap(),
                text,
                "re-extraction changed the query for input {:?}",
                input
            );
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let raw = "maybe this? SELECT ?x WHERE { ?x dbo:country dbr:France ";
        let a = extractor().extract(raw);
        let b = extractor().extract(raw);
        assert_eq!(a, b);
    }
}
