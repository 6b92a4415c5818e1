//! AI question generation: prompt, call, parse, repeat, then persist.

use std::sync::Arc;

use quizgen_storage::{Question, QuestionStatus, QuestionStore};

use crate::ai::AiClient;
use crate::error::QuizError;
use crate::parse::parse_question;
use crate::prompt::build_prompt;

/// Minimum topic length, in characters.
pub const MIN_TOPIC_CHARS: usize = 2;

/// Maximum topic length, in characters.
pub const MAX_TOPIC_CHARS: usize = 140;

/// Largest batch one `generate` call may request.
pub const MAX_BATCH_AMOUNT: usize = 10;

/// Generates questions with an [`AiClient`] and stores them as pending.
///
/// A batch is all-or-nothing: questions are collected in memory and written
/// with a single `insert_many` only after every AI call and parse succeeded.
/// The first failure aborts the batch and nothing is persisted.
pub struct GenerationPipeline {
    client: Arc<dyn AiClient>,
    store: Arc<dyn QuestionStore>,
}

impl GenerationPipeline {
    pub fn new(client: Arc<dyn AiClient>, store: Arc<dyn QuestionStore>) -> Self {
        Self { client, store }
    }

    /// Generate `amount` questions about `topic`, persist them, and return
    /// the in-memory copies.
    ///
    /// AI calls run sequentially, each awaited before the next starts.
    pub async fn generate(&self, topic: &str, amount: usize) -> Result<Vec<Question>, QuizError> {
        validate_topic(topic)?;
        validate_amount(amount)?;

        let prompt = build_prompt(topic);
        let mut questions = Vec::with_capacity(amount);
        for attempt in 1..=amount {
            let reply = self.client.complete(&prompt).await?;
            let mut question = parse_question(&reply)?;
            question.status = QuestionStatus::Pending;
            tracing::debug!(attempt, amount, "generated question");
            questions.push(question);
        }

        self.store.insert_many(&questions).await?;
        tracing::info!(topic, count = questions.len(), "stored generated questions");
        Ok(questions)
    }
}

/// Check the topic length bounds, counted in characters.
pub fn validate_topic(topic: &str) -> Result<(), QuizError> {
    let len = topic.chars().count();
    if !(MIN_TOPIC_CHARS..=MAX_TOPIC_CHARS).contains(&len) {
        return Err(QuizError::Validation(format!(
            "Topic must be at least {} characters and not exceed {} characters.",
            MIN_TOPIC_CHARS, MAX_TOPIC_CHARS
        )));
    }
    Ok(())
}

/// Check that a batch asks for between 1 and [`MAX_BATCH_AMOUNT`] questions.
pub fn validate_amount(amount: usize) -> Result<(), QuizError> {
    if !(1..=MAX_BATCH_AMOUNT).contains(&amount) {
        return Err(QuizError::Validation(format!(
            "Amount must be between 1 and {}.",
            MAX_BATCH_AMOUNT
        )));
    }
    Ok(())
}
