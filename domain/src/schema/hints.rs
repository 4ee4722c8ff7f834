//! Static schema hint provider.
//!
//! [`SchemaHint::get`] is pure lookup: no network, no failure modes, the
//! same value for the whole process lifetime. The vocabulary is the
//! frequently-used slice of the DBpedia ontology.

use crate::sparql::prefixes::{STANDARD_PREFIXES, uri_to_prefixed};
use std::sync::LazyLock;

/// A predicate or class the model is allowed to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyItem {
    pub label: &'static str,
    pub uri: &'static str,
    pub description: &'static str,
}

impl VocabularyItem {
    /// Compact prefixed name, e.g. `dbo:director`.
    pub fn prefixed(&self) -> String {
        uri_to_prefixed(self.uri)
    }
}

const COMMON_PROPERTIES: &[VocabularyItem] = &[
    VocabularyItem {
        label: "type",
        uri: "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
        description: "class/type of an entity",
    },
    VocabularyItem {
        label: "label",
        uri: "http://www.w3.org/2000/01/rdf-schema#label",
        description: "human-readable name",
    },
    VocabularyItem {
        label: "abstract",
        uri: "http://dbpedia.org/ontology/abstract",
        description: "short textual summary of the entity",
    },
    VocabularyItem {
        label: "population",
        uri: "http://dbpedia.org/ontology/populationTotal",
        description: "total population of a place",
    },
    VocabularyItem {
        label: "area",
        uri: "http://dbpedia.org/ontology/areaTotal",
        description: "total area of a place",
    },
    VocabularyItem {
        label: "country",
        uri: "http://dbpedia.org/ontology/country",
        description: "country an entity belongs to",
    },
    VocabularyItem {
        label: "capital",
        uri: "http://dbpedia.org/ontology/capital",
        description: "capital city of a country",
    },
    VocabularyItem {
        label: "birth place",
        uri: "http://dbpedia.org/ontology/birthPlace",
        description: "place where a person was born",
    },
    VocabularyItem {
        label: "birth date",
        uri: "http://dbpedia.org/ontology/birthDate",
        description: "date of birth",
    },
    VocabularyItem {
        label: "death date",
        uri: "http://dbpedia.org/ontology/deathDate",
        description: "date of death",
    },
    VocabularyItem {
        label: "author",
        uri: "http://dbpedia.org/ontology/author",
        description: "author of a written work",
    },
    VocabularyItem {
        label: "director",
        uri: "http://dbpedia.org/ontology/director",
        description: "director of a film or series",
    },
    VocabularyItem {
        label: "starring",
        uri: "http://dbpedia.org/ontology/starring",
        description: "main cast of a film or series",
    },
    VocabularyItem {
        label: "release date",
        uri: "http://dbpedia.org/ontology/releaseDate",
        description: "release date of a film, game, or product",
    },
    VocabularyItem {
        label: "genre",
        uri: "http://dbpedia.org/ontology/genre",
        description: "genre category of a creative work",
    },
    VocabularyItem {
        label: "official language",
        uri: "http://dbpedia.org/ontology/officialLanguage",
        description: "official language of a place",
    },
    VocabularyItem {
        label: "leader name",
        uri: "http://dbpedia.org/ontology/leaderName",
        description: "leader or head of government",
    },
];

const COMMON_CLASSES: &[VocabularyItem] = &[
    VocabularyItem {
        label: "person",
        uri: "http://dbpedia.org/ontology/Person",
        description: "human being",
    },
    VocabularyItem {
        label: "place",
        uri: "http://dbpedia.org/ontology/Place",
        description: "geographic location",
    },
    VocabularyItem {
        label: "city",
        uri: "http://dbpedia.org/ontology/City",
        description: "city or town",
    },
    VocabularyItem {
        label: "country",
        uri: "http://dbpedia.org/ontology/Country",
        description: "sovereign country",
    },
    VocabularyItem {
        label: "organization",
        uri: "http://dbpedia.org/ontology/Organisation",
        description: "organization or company",
    },
    VocabularyItem {
        label: "company",
        uri: "http://dbpedia.org/ontology/Company",
        description: "business entity",
    },
    VocabularyItem {
        label: "film",
        uri: "http://dbpedia.org/ontology/Film",
        description: "movie or film",
    },
    VocabularyItem {
        label: "book",
        uri: "http://dbpedia.org/ontology/Book",
        description: "book or written work",
    },
    VocabularyItem {
        label: "album",
        uri: "http://dbpedia.org/ontology/Album",
        description: "music album",
    },
    VocabularyItem {
        label: "song",
        uri: "http://dbpedia.org/ontology/Song",
        description: "song or single",
    },
    VocabularyItem {
        label: "university",
        uri: "http://dbpedia.org/ontology/University",
        description: "university or college",
    },
    VocabularyItem {
        label: "river",
        uri: "http://dbpedia.org/ontology/River",
        description: "river or waterway",
    },
    VocabularyItem {
        label: "mountain",
        uri: "http://dbpedia.org/ontology/Mountain",
        description: "mountain or peak",
    },
];

static HINTS: LazyLock<SchemaHint> = LazyLock::new(|| SchemaHint {
    prefixes: STANDARD_PREFIXES,
    properties: COMMON_PROPERTIES,
    classes: COMMON_CLASSES,
});

/// A compact, static description of the target graph's vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaHint {
    /// (prefix, namespace URI) pairs the model may use.
    pub prefixes: &'static [(&'static str, &'static str)],
    /// Frequently used predicates.
    pub properties: &'static [VocabularyItem],
    /// Frequently used classes.
    pub classes: &'static [VocabularyItem],
}

impl SchemaHint {
    /// The process-wide schema hints. Pure lookup, never fails.
    pub fn get() -> &'static SchemaHint {
        &HINTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_stable() {
        let a = SchemaHint::get();
        let b = SchemaHint::get();
        assert_eq!(a, b);
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_vocabulary_is_prefixed() {
        let hints = SchemaHint::get();
        let director = hints
            .properties
            .iter()
            .find(|p| p.label == "director")
            .unwrap();
        assert_eq!(director.prefixed(), "dbo:director");

        let film = hints.classes.iter().find(|c| c.label == "film").unwrap();
        assert_eq!(film.prefixed(), "dbo:Film");
    }
}
