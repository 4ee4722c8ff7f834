//! CLI entrypoint for nl2sparql
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use nl2sparql_application::{AnswerQuestionUseCase, EntityLinker, NoPipelineProgress};
use nl2sparql_infrastructure::{
    ConfigLoader, FileConfig, GroqGenerator, HttpSparqlEndpoint, SpotlightLinker,
};
use nl2sparql_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, StageReporter, banner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        print_config_locations();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    info!("Starting nl2sparql");

    let use_case = build_use_case(&config)?;

    // Chat mode
    if cli.chat {
        let banner = if cli.no_banner || std::env::var_os("NL2SPARQL_NO_BANNER").is_some() {
            None
        } else {
            Some(banner::render(
                &config.generation.model,
                &config.endpoint.url,
                config.endpoint.timeout_secs,
            ))
        };

        let repl = ChatRepl::new(use_case)
            .with_progress(!cli.quiet)
            .with_banner(banner);

        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    let cancel = CancellationToken::new();
    let answer = if cli.quiet {
        use_case
            .answer_with(&question, &NoPipelineProgress, &cancel)
            .await
    } else {
        let progress = StageReporter::new();
        use_case.answer_with(&question, &progress, &cancel).await
    };

    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format(&answer),
        OutputFormat::Json => ConsoleFormatter::format_json(&answer),
    };

    println!("{}", output);

    if answer.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}

/// Build the pipeline from configuration.
///
/// This is the dependency injection point: adapters for generation, the
/// endpoint, and the optional linker are constructed here and handed to
/// the use case behind their port traits.
fn build_use_case(config: &FileConfig) -> Result<AnswerQuestionUseCase> {
    let api_key = config.generation.resolve_api_key()?;

    let generator = Arc::new(GroqGenerator::new(&config.generation, api_key));
    let endpoint = Arc::new(HttpSparqlEndpoint::new(&config.endpoint));

    let mut use_case =
        AnswerQuestionUseCase::new(generator, endpoint, config.pipeline.to_params());

    if config.linker.enabled {
        let linker: Arc<dyn EntityLinker> = Arc::new(SpotlightLinker::new(&config.linker));
        use_case = use_case.with_linker(linker);
    }

    Ok(use_case)
}

fn print_config_locations() {
    println!("Configuration file locations (in priority order):");
    println!("  1. --config <path>");
    println!("  2. ./nl2sparql.toml or ./.nl2sparql.toml");
    match ConfigLoader::global_config_path() {
        Some(path) => println!("  3. {}", path.display()),
        None => println!("  3. (no global config directory found)"),
    }
    println!();
    println!("Environment overrides use the NL2SPARQL_ prefix with __ separators,");
    println!("e.g. NL2SPARQL_ENDPOINT__URL, NL2SPARQL_GENERATION__MODEL.");
}
