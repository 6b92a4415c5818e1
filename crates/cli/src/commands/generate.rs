use std::process;
use std::sync::Arc;

use quizgen_core::{Config, GeminiClient, GenerationPipeline};
use quizgen_storage::QuestionStore;

use crate::{print_questions, report_error, OutputFormat};

pub(crate) async fn cmd_generate(
    config: &Config,
    store: Arc<dyn QuestionStore>,
    topic: &str,
    amount: usize,
    output: OutputFormat,
    quiet: bool,
) {
    let client = Arc::new(GeminiClient::new(&config.ai));
    let pipeline = GenerationPipeline::new(client, store);

    match pipeline.generate(topic, amount).await {
        Ok(questions) => {
            print_questions(&questions, output);
            if !quiet && output == OutputFormat::Text {
                eprintln!("stored {} pending question(s)", questions.len());
            }
        }
        Err(e) => {
            if let Some(source) = std::error::Error::source(&e) {
                tracing::debug!(cause = %source, "generation failed");
            }
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}
