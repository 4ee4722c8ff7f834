//! DBpedia Spotlight entity linker.
//!
//! Spotlight performs named-entity recognition and disambiguation against
//! DBpedia, turning surface forms into canonical resource URIs. Linking
//! is an enrichment stage: every failure degrades to "no entities" and
//! the pipeline carries on.

use crate::config::file_config::FileLinkerConfig;
use async_trait::async_trait;
use nl2sparql_application::ports::linker::EntityLinker;
use nl2sparql_domain::{LinkedEntity, Question};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Entity-linking adapter for the DBpedia Spotlight annotate API.
pub struct SpotlightLinker {
    client: reqwest::Client,
    url: String,
    confidence: f64,
    support: i64,
    max_entities: usize,
    timeout: Duration,
}

impl SpotlightLinker {
    pub fn new(config: &FileLinkerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.url.clone(),
            confidence: config.confidence,
            support: config.support,
            max_entities: config.max_entities,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn annotate(&self, question: &Question) -> Result<String, reqwest::Error> {
        self.client
            .get(&self.url)
            .query(&[
                ("text", question.content()),
                ("confidence", &self.confidence.to_string()),
                ("support", &self.support.to_string()),
            ])
            .header("Accept", "application/json")
            .header("User-Agent", "nl2sparql/0.1")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl EntityLinker for SpotlightLinker {
    async fn link(&self, question: &Question) -> Vec<LinkedEntity> {
        let body = match tokio::time::timeout(self.timeout, self.annotate(question)).await {
            Ok(Ok(body)) => body,
            Ok(Err(err)) => {
                warn!("Entity linking failed, continuing without entities: {}", err);
                return Vec::new();
            }
            Err(_) => {
                warn!("Entity linking timed out, continuing without entities");
                return Vec::new();
            }
        };

        let entities = parse_annotations(&body, self.confidence, self.support, self.max_entities);
        debug!("Linked {} entities", entities.len());
        entities
    }
}

/// Parse and filter a Spotlight annotate response.
///
/// Keeps resources meeting the confidence and support thresholds, drops
/// duplicate URIs, sorts best-scored first, and caps the list.
fn parse_annotations(
    body: &str,
    confidence: f64,
    support: i64,
    max_entities: usize,
) -> Vec<LinkedEntity> {
    let parsed: AnnotateResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("Unparseable Spotlight response: {}", err);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut entities = Vec::new();
    for resource in parsed.resources {
        let Some(uri) = resource.uri else { continue };
        if !seen.insert(uri.clone()) {
            continue;
        }

        let similarity = resource
            .similarity_score
            .as_deref()
            .and_then(|s| s.parse::<f64>().ok())
            .unwrap_or(0.0);
        let res_support = resource
            .support
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(0);
        if similarity < confidence || res_support < support {
            continue;
        }

        entities.push(
            LinkedEntity::new(resource.surface_form.unwrap_or_default(), uri)
                .with_types(resource.types.unwrap_or_default())
                .with_scores(similarity, res_support),
        );
    }

    entities.sort_by(|a, b| {
        b.similarity_score
            .total_cmp(&a.similarity_score)
            .then(b.support.cmp(&a.support))
    });
    entities.truncate(max_entities);
    entities
}

// Spotlight's JSON uses `@`-prefixed keys with string-typed numbers

#[derive(Deserialize)]
struct AnnotateResponse {
    #[serde(rename = "Resources", default)]
    resources: Vec<AnnotatedResource>,
}

#[derive(Deserialize)]
struct AnnotatedResource {
    #[serde(rename = "@URI")]
    uri: Option<String>,
    #[serde(rename = "@surfaceForm")]
    surface_form: Option<String>,
    #[serde(rename = "@types")]
    types: Option<String>,
    #[serde(rename = "@similarityScore")]
    similarity_score: Option<String>,
    #[serde(rename = "@support")]
    support: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Resources": [
            {
                "@URI": "http://dbpedia.org/resource/Inception",
                "@surfaceForm": "Inception",
                "@types": "DBpedia:Film,DBpedia:Work",
                "@similarityScore": "0.9996",
                "@support": "1250"
            },
            {
                "@URI": "http://dbpedia.org/resource/Inception",
                "@surfaceForm": "Inception",
                "@similarityScore": "0.9",
                "@support": "1250"
            },
            {
                "@URI": "http://dbpedia.org/resource/Low_confidence",
                "@surfaceForm": "something",
                "@similarityScore": "0.1",
                "@support": "1000"
            },
            {
                "@URI": "http://dbpedia.org/resource/Christopher_Nolan",
                "@surfaceForm": "Nolan",
                "@similarityScore": "0.8",
                "@support": "900"
            }
        ]
    }"#;

    #[test]
    fn test_parse_filters_dedupes_and_sorts() {
        let entities = parse_annotations(SAMPLE, 0.35, 20, 4);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].uri, "http://dbpedia.org/resource/Inception");
        assert_eq!(entities[0].types, "DBpedia:Film,DBpedia:Work");
        assert_eq!(entities[1].surface_form, "Nolan");
    }

    #[test]
    fn test_max_entities_cap() {
        let entities = parse_annotations(SAMPLE, 0.35, 20, 1);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].surface_form, "Inception");
    }

    #[test]
    fn test_empty_and_garbage_responses_link_nothing() {
        assert!(parse_annotations("{}", 0.35, 20, 4).is_empty());
        assert!(parse_annotations("<html>busy</html>", 0.35, 20, 4).is_empty());
    }
}
