use std::path::Path;
use std::process;
use std::sync::Arc;

use quizgen_storage::{Question, QuestionStore};

use crate::{report_error, OutputFormat};

/// Accept either a JSON array of questions or a single question object.
fn read_questions(json: &str) -> Result<Vec<Question>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value),
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

pub(crate) async fn cmd_import(
    store: Arc<dyn QuestionStore>,
    path: &Path,
    output: OutputFormat,
    quiet: bool,
) {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: file not found: {}", path.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let questions = match read_questions(&source) {
        Ok(q) => q,
        Err(e) => {
            let msg = format!("error: invalid questions in {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    for (i, question) in questions.iter().enumerate() {
        if let Err(e) = store.insert_one(question).await {
            tracing::error!(error = %e, index = i, "failed to insert question");
            let msg = format!(
                "error: could not create question {} of {} (imported {})",
                i + 1,
                questions.len(),
                i
            );
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => println!("imported {} question(s)", questions.len()),
        OutputFormat::Json => println!("{}", serde_json::json!({ "imported": questions.len() })),
    }
}
