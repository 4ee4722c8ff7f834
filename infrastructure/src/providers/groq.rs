//! Groq chat-completions adapter.
//!
//! Implements [`GenerationGateway`] against the OpenAI-compatible
//! `/chat/completions` API Groq exposes. One `generate()` call is exactly
//! one provider request; the timeout is enforced here with
//! `tokio::time::timeout` rather than trusting the provider.

use crate::config::file_config::FileGenerationConfig;
use async_trait::async_trait;
use nl2sparql_application::ports::generation::{GenerationError, GenerationGateway};
use nl2sparql_domain::PromptRequest;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Generation adapter for the Groq API.
pub struct GroqGenerator {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl GroqGenerator {
    pub fn new(config: &FileGenerationConfig, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn request(&self, prompt: &PromptRequest) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::Provider(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Provider(format!(
                "HTTP {} from provider",
                status.as_u16()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Provider(format!("unparseable response: {}", e)))?;

        extract_content(parsed)
    }
}

#[async_trait]
impl GenerationGateway for GroqGenerator {
    async fn generate(&self, prompt: &PromptRequest) -> Result<String, GenerationError> {
        debug!(model = %self.model, "Requesting query generation");
        match tokio::time::timeout(self.timeout, self.request(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout),
        }
    }
}

/// Pull the first choice's text out of a parsed response.
fn extract_content(response: ChatResponse) -> Result<String, GenerationError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        Err(GenerationError::EmptyOutput)
    } else {
        Ok(content)
    }
}

// Wire types for the OpenAI-compatible chat completions API

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "SELECT ?x WHERE { ?x ?p ?o }"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_content(response).unwrap(),
            "SELECT ?x WHERE { ?x ?p ?o }"
        );
    }

    #[test]
    fn test_empty_choices_is_empty_output() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(
            extract_content(response).unwrap_err(),
            GenerationError::EmptyOutput
        );
    }

    #[test]
    fn test_whitespace_content_is_empty_output() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "   \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            extract_content(response).unwrap_err(),
            GenerationError::EmptyOutput
        );
    }
}
