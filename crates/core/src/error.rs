use quizgen_storage::StorageError;

use crate::ai::AiError;
use crate::parse::ResponseParseError;

/// Errors surfaced by the generation pipeline and the random sampler.
///
/// The `Display` text is what API callers see. For everything except
/// validation failures it is a short fixed message; the underlying cause is
/// available through `source()` for server-side logging only.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// Bad caller input (topic length, negative amount).
    #[error("{0}")]
    Validation(String),
    /// The AI provider call failed.
    #[error("The AI service could not generate a question.")]
    AiService(#[from] AiError),
    /// The AI reply did not contain a usable question.
    #[error("The AI service returned a malformed question.")]
    Parse(#[from] ResponseParseError),
    /// The question store rejected a read or write.
    #[error("The question store is unavailable.")]
    Store(#[from] StorageError),
}

impl QuizError {
    /// True for errors caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, QuizError::Validation(_))
    }
}
