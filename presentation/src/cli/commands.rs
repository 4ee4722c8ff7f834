//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Plain answer text
    Text,
    /// JSON with the answer text and outcome kind
    Json,
}

/// CLI arguments for nl2sparql
#[derive(Parser, Debug)]
#[command(name = "nl2sparql")]
#[command(author, version, about = "Ask a knowledge graph questions in natural language")]
#[command(long_about = r#"
nl2sparql answers natural-language questions by generating a SPARQL query
with an LLM, executing it against a public knowledge graph endpoint, and
reducing the result bindings to a short answer.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./nl2sparql.toml    Project-level config
3. ~/.config/nl2sparql/config.toml   Global config

Environment variables prefixed with NL2SPARQL_ override file values,
e.g. NL2SPARQL_ENDPOINT__URL. The generation API key is read from the
environment variable named by generation.api_key_env (default GROQ_API_KEY).

Example:
  nl2sparql "Who directed Inception?"
  nl2sparql --output json "Is Berlin the capital of Germany?"
  nl2sparql --chat
"#)]
pub struct Cli {
    /// The question to answer (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip the startup banner in chat mode
    #[arg(long)]
    pub no_banner: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
