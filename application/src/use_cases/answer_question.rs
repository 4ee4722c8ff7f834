//! Answer Question use case — the pipeline orchestrator.
//!
//! Sequences prompt building, generation, extraction/validation,
//! execution, and reduction as an explicit state machine:
//!
//! ```text
//! Start → Generating → Validating → Executing → Reducing → Done
//!             ^             |            |
//!             +--(invalid)--+            |
//!             +-----(endpoint rejected)--+
//! ```
//!
//! The repair loop is bounded by `max_generation_attempts`; each loop edge
//! carries feedback text into the next prompt. Transport failures
//! (network/timeout) never regenerate — the query was plausibly fine, so
//! the same query is retried with backoff and then surfaced as a failure.
//!
//! Every run resolves to an [`Answer`]; no error crosses this boundary.

use crate::config::PipelineParams;
use crate::ports::endpoint::{EndpointError, SparqlEndpoint};
use crate::ports::generation::{GenerationError, GenerationGateway};
use crate::ports::linker::{EntityLinker, NoEntityLinker};
use crate::ports::progress::{NoPipelineProgress, PipelineProgress};
use nl2sparql_domain::{
    Answer, CandidateQuery, FailureKind, LinkedEntity, PromptBuilder, Question, QueryExtractor,
    SchemaHint, SparqlResults, reduce,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Orchestrator state. The attempt counter lives outside so exhaustion is
/// checked in exactly one place.
enum PipelineState {
    Generating { feedback: Option<String> },
    Validating { raw: String },
    Executing { query: String },
    Reducing { results: SparqlResults },
    Done(Answer),
}

/// Use case answering one natural-language question.
///
/// `answer()` is the entire surface the front-ends depend on. The use
/// case is cheap to clone and safe to share across concurrent runs: all
/// per-run state lives on the stack of a single `answer()` call.
pub struct AnswerQuestionUseCase {
    generator: Arc<dyn GenerationGateway>,
    endpoint: Arc<dyn SparqlEndpoint>,
    linker: Arc<dyn EntityLinker>,
    params: PipelineParams,
    prompts: PromptBuilder,
    extractor: QueryExtractor,
}

impl Clone for AnswerQuestionUseCase {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            endpoint: self.endpoint.clone(),
            linker: self.linker.clone(),
            params: self.params.clone(),
            prompts: self.prompts.clone(),
            extractor: self.extractor.clone(),
        }
    }
}

impl AnswerQuestionUseCase {
    pub fn new(
        generator: Arc<dyn GenerationGateway>,
        endpoint: Arc<dyn SparqlEndpoint>,
        params: PipelineParams,
    ) -> Self {
        let prompts = PromptBuilder::new(params.default_select_limit);
        let extractor = QueryExtractor::new().with_select_limit(params.default_select_limit);
        Self {
            generator,
            endpoint,
            linker: Arc::new(NoEntityLinker),
            params,
            prompts,
            extractor,
        }
    }

    /// Attach an entity linker (defaults to none).
    pub fn with_linker(mut self, linker: Arc<dyn EntityLinker>) -> Self {
        self.linker = linker;
        self
    }

    /// Answer a question. Never fails — failures come back as an [`Answer`].
    pub async fn answer(&self, question: &str) -> Answer {
        self.answer_with(question, &NoPipelineProgress, &CancellationToken::new())
            .await
    }

    /// Answer with progress callbacks and cooperative cancellation.
    ///
    /// Cancellation is checked between stages; an in-flight network call
    /// is abandoned, not interrupted.
    pub async fn answer_with(
        &self,
        question: &str,
        progress: &dyn PipelineProgress,
        cancel: &CancellationToken,
    ) -> Answer {
        let question = match Question::try_new(question) {
            Some(q) => q,
            None => return Answer::failure(FailureKind::EmptyQuestion),
        };
        info!("Answering: {}", question);

        let hints = SchemaHint::get();
        let entities = self.linker.link(&question).await;
        progress.on_entities_linked(entities.len());
        debug!("Linked {} entities", entities.len());

        let mut attempts: u32 = 0;
        let mut state = PipelineState::Generating { feedback: None };

        loop {
            if cancel.is_cancelled() {
                return Answer::failure(FailureKind::Cancelled);
            }

            state = match state {
                PipelineState::Generating { feedback } => {
                    if attempts >= self.params.max_generation_attempts {
                        warn!(
                            "Generation attempts exhausted after {} tries",
                            self.params.max_generation_attempts
                        );
                        break Answer::failure(FailureKind::GenerationExhausted);
                    }
                    attempts += 1;
                    progress.on_generation_attempt(attempts, self.params.max_generation_attempts);

                    let prompt =
                        self.prompts
                            .build(&question, hints, &entities, feedback.as_deref());
                    match self.generator.generate(&prompt).await {
                        Ok(raw) => PipelineState::Validating { raw },
                        Err(err) => {
                            warn!("Generation attempt {} failed: {}", attempts, err);
                            PipelineState::Generating {
                                feedback: generation_feedback(&err),
                            }
                        }
                    }
                }

                PipelineState::Validating { raw } => {
                    // Invariant: only Raw/Repaired ever reach execution
                    match self.extractor.extract(&raw) {
                        CandidateQuery::Invalid(reason) => {
                            debug!("Candidate query invalid: {:?}", reason);
                            PipelineState::Generating {
                                feedback: Some(reason.feedback().to_string()),
                            }
                        }
                        CandidateQuery::Raw(query) => {
                            progress.on_query_ready(&query, false);
                            debug!("Candidate query ready:\n{query}");
                            PipelineState::Executing { query }
                        }
                        CandidateQuery::Repaired(query) => {
                            progress.on_query_ready(&query, true);
                            debug!("Candidate query ready (repaired):\n{query}");
                            PipelineState::Executing { query }
                        }
                    }
                }

                PipelineState::Executing { query } => {
                    match self.execute_with_retries(&query, progress, cancel).await {
                        Ok(results) => PipelineState::Reducing { results },
                        Err(EndpointError::Rejected { status, message }) => {
                            debug!("Endpoint rejected query (HTTP {}): {}", status, message);
                            PipelineState::Generating {
                                feedback: Some(format!(
                                    "The endpoint rejected the previous query: {}",
                                    message
                                )),
                            }
                        }
                        Err(err) => {
                            warn!("Execution failed terminally: {}", err);
                            break Answer::failure(err.failure_kind());
                        }
                    }
                }

                PipelineState::Reducing { results } => {
                    debug!("Reducing {} result rows", results.rows.len());
                    PipelineState::Done(reduce(&question, &results))
                }

                PipelineState::Done(answer) => break answer,
            };
        }
    }

    /// Execute one query, retrying transport failures with doubling
    /// backoff. Rejections and malformed responses return immediately.
    async fn execute_with_retries(
        &self,
        query: &str,
        progress: &dyn PipelineProgress,
        cancel: &CancellationToken,
    ) -> Result<SparqlResults, EndpointError> {
        let mut backoff = self.params.retry_backoff;
        let mut last_err = None;

        for attempt in 0..=self.params.transport_retries {
            if attempt > 0 {
                progress.on_transport_retry(attempt, self.params.transport_retries);
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
            if cancel.is_cancelled() {
                break;
            }

            match self.endpoint.execute(query).await {
                Ok(results) => return Ok(results),
                Err(err) if err.is_transport() => {
                    warn!(
                        "Transport failure on execute (attempt {}/{}): {}",
                        attempt + 1,
                        self.params.transport_retries + 1,
                        err
                    );
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or(EndpointError::Timeout))
    }
}

/// Feedback handed to the next generation attempt after a gateway error.
/// Timeouts and provider errors re-use the original prompt unchanged.
fn generation_feedback(err: &GenerationError) -> Option<String> {
    match err {
        GenerationError::EmptyOutput => Some(
            "The previous attempt returned no query text. \
             Respond with a single SPARQL query and nothing else."
                .to_string(),
        ),
        GenerationError::Timeout | GenerationError::Provider(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nl2sparql_domain::{PromptRequest, RdfTerm};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct MockGenerator {
        responses: Mutex<VecDeque<Result<String, GenerationError>>>,
        calls: AtomicUsize,
        last_user_prompt: Mutex<Option<String>>,
    }

    impl MockGenerator {
        fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: AtomicUsize::new(0),
                last_user_prompt: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerationGateway for MockGenerator {
        async fn generate(&self, prompt: &PromptRequest) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user_prompt.lock().unwrap() = Some(prompt.user.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(GenerationError::EmptyOutput))
        }
    }

    struct MockEndpoint {
        responses: Mutex<VecDeque<Result<SparqlResults, EndpointError>>>,
        calls: AtomicUsize,
    }

    impl MockEndpoint {
        fn new(responses: Vec<Result<SparqlResults, EndpointError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: AtomicUsize::new(0),
            }
        }

        fn always_timeout() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SparqlEndpoint for MockEndpoint {
        async fn execute(&self, _query: &str) -> Result<SparqlResults, EndpointError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(EndpointError::Timeout))
        }
    }

    const NOLAN_QUERY: &str =
        "PREFIX dbo: <http://dbpedia.org/ontology/>\n\
         PREFIX dbr: <http://dbpedia.org/resource/>\n\
         SELECT ?director WHERE { dbr:Inception dbo:director ?director }\nLIMIT 50";

    fn nolan_results() -> SparqlResults {
        let mut row = std::collections::HashMap::new();
        row.insert(
            "director".to_string(),
            RdfTerm::Uri("http://dbpedia.org/resource/Christopher_Nolan".to_string()),
        );
        SparqlResults {
            vars: vec!["director".to_string()],
            rows: vec![row],
            boolean: None,
        }
    }

    fn fast_params() -> PipelineParams {
        PipelineParams::default().with_retry_backoff(Duration::from_millis(1))
    }

    fn use_case(
        generator: Arc<MockGenerator>,
        endpoint: Arc<MockEndpoint>,
        params: PipelineParams,
    ) -> AnswerQuestionUseCase {
        AnswerQuestionUseCase::new(generator, endpoint, params)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_happy_path_yields_fact() {
        let generator = Arc::new(MockGenerator::new(vec![Ok(NOLAN_QUERY.to_string())]));
        let endpoint = Arc::new(MockEndpoint::new(vec![Ok(nolan_results())]));
        let uc = use_case(generator.clone(), endpoint.clone(), fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert!(answer.is_fact());
        assert!(answer.text().contains("Christopher Nolan"));
        assert_eq!(generator.calls(), 1);
        assert_eq!(endpoint.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_question_is_validation_failure() {
        let generator = Arc::new(MockGenerator::new(vec![]));
        let endpoint = Arc::new(MockEndpoint::new(vec![]));
        let uc = use_case(generator.clone(), endpoint, fast_params());

        let answer = uc.answer("   ").await;

        assert_eq!(
            answer.kind(),
            nl2sparql_domain::AnswerKind::Failure(FailureKind::EmptyQuestion)
        );
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_output_then_success_uses_two_attempts() {
        // EmptyOutput on attempt 1, valid query on attempt 2
        let generator = Arc::new(MockGenerator::new(vec![
            Err(GenerationError::EmptyOutput),
            Ok(NOLAN_QUERY.to_string()),
        ]));
        let endpoint = Arc::new(MockEndpoint::new(vec![Ok(nolan_results())]));
        let uc = use_case(generator.clone(), endpoint, fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert!(answer.is_fact());
        assert_eq!(generator.calls(), 2, "generator must run exactly twice");
    }

    #[tokio::test]
    async fn test_invalid_query_regenerates_with_feedback() {
        let generator = Arc::new(MockGenerator::new(vec![
            Ok("I'm not sure how to write that query.".to_string()),
            Ok(NOLAN_QUERY.to_string()),
        ]));
        let endpoint = Arc::new(MockEndpoint::new(vec![Ok(nolan_results())]));
        let uc = use_case(generator.clone(), endpoint, fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert!(answer.is_fact());
        assert_eq!(generator.calls(), 2);
        // The second prompt must carry the failure feedback
        let prompt = generator.last_user_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("previous attempt failed"));
    }

    #[tokio::test]
    async fn test_exhaustion_after_max_attempts() {
        let generator = Arc::new(MockGenerator::new(vec![
            Ok("no query here".to_string()),
            Ok("still no query".to_string()),
            Ok(NOLAN_QUERY.to_string()), // never reached
        ]));
        let endpoint = Arc::new(MockEndpoint::new(vec![]));
        let uc = use_case(generator.clone(), endpoint, fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert_eq!(
            answer.kind(),
            nl2sparql_domain::AnswerKind::Failure(FailureKind::GenerationExhausted)
        );
        assert_eq!(generator.calls(), 2, "attempt bound must hold");
    }

    #[tokio::test]
    async fn test_endpoint_timeout_never_regenerates() {
        // Transport failures retry the same query and then fail, without
        // a second generation call.
        let generator = Arc::new(MockGenerator::new(vec![Ok(NOLAN_QUERY.to_string())]));
        let endpoint = Arc::new(MockEndpoint::always_timeout());
        let params = fast_params().with_transport_retries(2);
        let uc = use_case(generator.clone(), endpoint.clone(), params);

        let answer = uc.answer("Who directed Inception?").await;

        assert_eq!(
            answer.kind(),
            nl2sparql_domain::AnswerKind::Failure(FailureKind::EndpointTimeout)
        );
        assert_eq!(generator.calls(), 1, "transport failure must not regenerate");
        assert_eq!(endpoint.calls(), 3, "initial call plus two retries");
    }

    #[tokio::test]
    async fn test_network_error_retries_then_succeeds() {
        let generator = Arc::new(MockGenerator::new(vec![Ok(NOLAN_QUERY.to_string())]));
        let endpoint = Arc::new(MockEndpoint::new(vec![
            Err(EndpointError::Network("connection reset".to_string())),
            Ok(nolan_results()),
        ]));
        let uc = use_case(generator.clone(), endpoint.clone(), fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert!(answer.is_fact());
        assert_eq!(endpoint.calls(), 2);
        assert_eq!(generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_endpoint_rejection_regenerates() {
        let generator = Arc::new(MockGenerator::new(vec![
            Ok(NOLAN_QUERY.to_string()),
            Ok(NOLAN_QUERY.to_string()),
        ]));
        let endpoint = Arc::new(MockEndpoint::new(vec![
            Err(EndpointError::Rejected {
                status: 400,
                message: "Virtuoso 37000 syntax error".to_string(),
            }),
            Ok(nolan_results()),
        ]));
        let uc = use_case(generator.clone(), endpoint.clone(), fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert!(answer.is_fact());
        assert_eq!(generator.calls(), 2, "rejection must regenerate");
        let prompt = generator.last_user_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("endpoint rejected"));
    }

    #[tokio::test]
    async fn test_no_bindings_is_no_answer_found() {
        let generator = Arc::new(MockGenerator::new(vec![Ok(NOLAN_QUERY.to_string())]));
        let endpoint = Arc::new(MockEndpoint::new(vec![Ok(SparqlResults {
            vars: vec!["director".to_string()],
            rows: vec![],
            boolean: None,
        })]));
        let uc = use_case(generator, endpoint, fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert_eq!(answer.kind(), nl2sparql_domain::AnswerKind::NoResult);
        assert!(!answer.is_failure());
    }

    #[tokio::test]
    async fn test_malformed_response_is_terminal() {
        let generator = Arc::new(MockGenerator::new(vec![
            Ok(NOLAN_QUERY.to_string()),
            Ok(NOLAN_QUERY.to_string()),
        ]));
        let endpoint = Arc::new(MockEndpoint::new(vec![Err(EndpointError::Malformed(
            "not json".to_string(),
        ))]));
        let uc = use_case(generator.clone(), endpoint.clone(), fast_params());

        let answer = uc.answer("Who directed Inception?").await;

        assert_eq!(
            answer.kind(),
            nl2sparql_domain::AnswerKind::Failure(FailureKind::MalformedResponse)
        );
        assert_eq!(generator.calls(), 1);
        assert_eq!(endpoint.calls(), 1, "malformed responses are not retried");
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let generator = Arc::new(MockGenerator::new(vec![Ok(NOLAN_QUERY.to_string())]));
        let endpoint = Arc::new(MockEndpoint::new(vec![]));
        let uc = use_case(generator.clone(), endpoint, fast_params());

        let token = CancellationToken::new();
        token.cancel();
        let answer = uc
            .answer_with("Who directed Inception?", &NoPipelineProgress, &token)
            .await;

        assert_eq!(
            answer.kind(),
            nl2sparql_domain::AnswerKind::Failure(FailureKind::Cancelled)
        );
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_repaired_query_is_executed() {
        // Model output missing a brace and prefix declarations still runs
        let generator = Arc::new(MockGenerator::new(vec![Ok(
            r#"SELECT ?x WHERE { ?x foaf:name "Inception" "#.to_string(),
        )]));
        let endpoint = Arc::new(MockEndpoint::new(vec![Ok(nolan_results())]));
        let uc = use_case(generator, endpoint.clone(), fast_params());

        let answer = uc.answer("What is named Inception?").await;

        assert!(answer.is_fact());
        assert_eq!(endpoint.calls(), 1);
    }
}
