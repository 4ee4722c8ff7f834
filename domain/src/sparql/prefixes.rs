//! Standard namespace prefixes for the target knowledge graph.
//!
//! The generation prompt, the repair pass, and the answer formatter all
//! share this single table so a prefix never means two different things.

/// (prefix, namespace URI) pairs the pipeline knows about.
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("dbo", "http://dbpedia.org/ontology/"),
    ("dbr", "http://dbpedia.org/resource/"),
    ("dbp", "http://dbpedia.org/property/"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Look up the namespace URI for a standard prefix.
pub fn namespace_for(prefix: &str) -> Option<&'static str> {
    STANDARD_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, ns)| *ns)
}

/// Render a `PREFIX` declaration line for a standard prefix.
pub fn declaration(prefix: &str) -> Option<String> {
    namespace_for(prefix).map(|ns| format!("PREFIX {}: <{}>", prefix, ns))
}

/// All standard declarations, one per line, in table order.
pub fn all_declarations() -> String {
    STANDARD_PREFIXES
        .iter()
        .map(|(p, ns)| format!("PREFIX {}: <{}>", p, ns))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert a full URI to its compact prefixed form where a standard
/// namespace matches, otherwise return the URI unchanged.
pub fn uri_to_prefixed(uri: &str) -> String {
    for (prefix, ns) in STANDARD_PREFIXES {
        if let Some(local) = uri.strip_prefix(ns) {
            return format!("{}:{}", prefix, local);
        }
    }
    uri.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_lookup() {
        assert_eq!(namespace_for("foaf"), Some("http://xmlns.com/foaf/0.1/"));
        assert_eq!(namespace_for("nope"), None);
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            declaration("dbo").unwrap(),
            "PREFIX dbo: <http://dbpedia.org/ontology/>"
        );
    }

    #[test]
    fn test_uri_to_prefixed() {
        assert_eq!(
            uri_to_prefixed("http://dbpedia.org/resource/Inception"),
            "dbr:Inception"
        );
        assert_eq!(
            uri_to_prefixed("http://example.org/unknown"),
            "http://example.org/unknown"
        );
    }
}
