use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::{Question, QuestionFilter};

/// The persistence boundary for quiz questions.
///
/// A `QuestionStore` exclusively owns persisted records. Callers only ever
/// receive transient copies for the duration of a request.
///
/// ## Sampling Semantics
///
/// `sample` always excludes questions whose status is `"pending"`. The
/// caller's filter is ANDed with that condition, never merged over it.
/// When fewer than `amount` records match, the matching subset is returned
/// without error. Order is random and repeated calls may differ.
///
/// ## Atomicity
///
/// `insert_many` is a single backend write. No application-level
/// transaction wraps it; concurrency control is whatever the backend
/// provides for a bulk insert.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be used in axum
/// application state and across async task boundaries.
#[async_trait]
pub trait QuestionStore: Send + Sync + 'static {
    /// Insert a single question.
    async fn insert_one(&self, question: &Question) -> Result<(), StorageError>;

    /// Insert a batch of questions in one write. An empty batch is a no-op.
    async fn insert_many(&self, questions: &[Question]) -> Result<(), StorageError>;

    /// Return up to `amount` random non-pending questions matching `filter`.
    async fn sample(
        &self,
        amount: usize,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, StorageError>;
}
