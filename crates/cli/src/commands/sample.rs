use std::process;
use std::sync::Arc;

use quizgen_core::RandomSampler;
use quizgen_storage::{Difficulty, QuestionFilter, QuestionStore};

use crate::{print_questions, report_error, OutputFormat};

pub(crate) async fn cmd_sample(
    store: Arc<dyn QuestionStore>,
    amount: i64,
    difficulty: Option<&str>,
    output: OutputFormat,
    quiet: bool,
) {
    let filter = match difficulty {
        Some(raw) => match raw.parse::<Difficulty>() {
            Ok(d) => QuestionFilter::new().with_difficulty(d),
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        },
        None => QuestionFilter::new(),
    };

    let sampler = RandomSampler::new(store);
    match sampler.sample(amount, &filter).await {
        Ok(questions) => print_questions(&questions, output),
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}
