//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::ConsoleFormatter;
use crate::progress::reporter::StageReporter;
use colored::Colorize;
use nl2sparql_application::{AnswerQuestionUseCase, NoPipelineProgress};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tokio_util::sync::CancellationToken;

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: AnswerQuestionUseCase,
    show_progress: bool,
    banner: Option<String>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: AnswerQuestionUseCase) -> Self {
        Self {
            use_case,
            show_progress: true,
            banner: None,
        }
    }

    /// Set whether to show stage progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set a banner to print before the first prompt
    pub fn with_banner(mut self, banner: Option<String>) -> Self {
        self.banner = banner;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = dirs::data_dir().map(|p| p.join("nl2sparql").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if let Some(ref banner) = self.banner {
            println!("{}", banner);
        }

        loop {
            let prompt = format!("\n{} ", ">>".cyan().bold());
            let readline = rl.readline(&prompt);

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if matches!(line.to_lowercase().as_str(), "exit" | "quit") {
                        println!("Bye!");
                        break;
                    }

                    // Add to history
                    let _ = rl.add_history_entry(line);

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn process_question(&self, question: &str) {
        let cancel = CancellationToken::new();

        let answer = if self.show_progress {
            let progress = StageReporter::new();
            self.use_case
                .answer_with(question, &progress, &cancel)
                .await
        } else {
            self.use_case
                .answer_with(question, &NoPipelineProgress, &cancel)
                .await
        };

        println!("\n{}", ConsoleFormatter::format(&answer));
    }
}
