//! SPARQL result bindings model.
//!
//! Parses the W3C `application/sparql-results+json` format into a typed
//! row set. Row order is preserved exactly as the endpoint returned it;
//! an empty row set is a valid outcome, not an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A single RDF term bound to a variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RdfTerm {
    /// A resource URI.
    Uri(String),
    /// A literal with optional language tag and datatype.
    Literal {
        value: String,
        lang: Option<String>,
        datatype: Option<String>,
    },
    /// A blank node label.
    Bnode(String),
}

impl RdfTerm {
    /// Human-readable rendering: literals verbatim, URIs by their trailing
    /// label segment with underscores replaced by spaces.
    pub fn display_label(&self) -> String {
        match self {
            RdfTerm::Literal { value, .. } => value.clone(),
            RdfTerm::Uri(uri) => {
                let token = uri.rsplit('/').next().unwrap_or(uri);
                let token = token.rsplit('#').next().unwrap_or(token);
                token.replace('_', " ")
            }
            RdfTerm::Bnode(label) => format!("_:{}", label),
        }
    }
}

/// One result row: variable name → bound term.
pub type BindingRow = HashMap<String, RdfTerm>;

/// A parsed result set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparqlResults {
    /// Variable names in the endpoint's declared order.
    pub vars: Vec<String>,
    /// Binding rows in the endpoint's returned order.
    pub rows: Vec<BindingRow>,
    /// Boolean result for ASK queries.
    pub boolean: Option<bool>,
}

impl SparqlResults {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.boolean.is_none()
    }

    /// The first declared variable that is actually bound in some row.
    pub fn first_bound_var(&self) -> Option<&str> {
        self.vars
            .iter()
            .find(|var| self.rows.iter().any(|row| row.contains_key(*var)))
            .map(|s| s.as_str())
    }

    /// Parse the W3C SPARQL JSON results format.
    pub fn from_json(body: &str) -> Result<Self, ResultsParseError> {
        let doc: WireDocument =
            serde_json::from_str(body).map_err(|e| ResultsParseError(e.to_string()))?;

        if doc.results.is_none() && doc.boolean.is_none() {
            return Err(ResultsParseError(
                "neither 'results' nor 'boolean' present".to_string(),
            ));
        }

        let vars = doc.head.map(|h| h.vars).unwrap_or_default();
        let rows = doc
            .results
            .map(|r| {
                r.bindings
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|(var, term)| (var, term.into_term()))
                            .collect()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            vars,
            rows,
            boolean: doc.boolean,
        })
    }
}

/// The endpoint returned 200 but the body is not a result set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed result document: {0}")]
pub struct ResultsParseError(pub String);

// Wire-format mirror of the JSON document

#[derive(Deserialize)]
struct WireDocument {
    head: Option<WireHead>,
    results: Option<WireResults>,
    boolean: Option<bool>,
}

#[derive(Deserialize)]
struct WireHead {
    #[serde(default)]
    vars: Vec<String>,
}

#[derive(Deserialize)]
struct WireResults {
    #[serde(default)]
    bindings: Vec<HashMap<String, WireTerm>>,
}

#[derive(Deserialize)]
struct WireTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(rename = "xml:lang")]
    lang: Option<String>,
    datatype: Option<String>,
}

impl WireTerm {
    fn into_term(self) -> RdfTerm {
        match self.kind.as_str() {
            "uri" => RdfTerm::Uri(self.value),
            "bnode" => RdfTerm::Bnode(self.value),
            // "literal" and Virtuoso's legacy "typed-literal"
            _ => RdfTerm::Literal {
                value: self.value,
                lang: self.lang,
                datatype: self.datatype,
            },
        }
    }
}
