//! Random sampling of reviewed questions.

use std::sync::Arc;

use quizgen_storage::{Question, QuestionFilter, QuestionStore};

use crate::error::QuizError;

/// Draws random non-pending questions from a [`QuestionStore`].
pub struct RandomSampler {
    store: Arc<dyn QuestionStore>,
}

impl RandomSampler {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// Return up to `amount` random questions that are not pending and
    /// match `filter`. Fewer matches than requested is not an error.
    pub async fn sample(
        &self,
        amount: i64,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, QuizError> {
        let amount = usize::try_from(amount)
            .map_err(|_| QuizError::Validation("Amount must be a positive number.".to_string()))?;
        tracing::debug!(amount, ?filter, "sampling random questions");

        self.store.sample(amount, filter).await.map_err(|e| {
            tracing::error!(error = %e, "error fetching random questions");
            QuizError::Store(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quizgen_storage::{Difficulty, MemoryQuestionStore, QuestionStatus, StorageError};

    struct BrokenStore;

    #[async_trait]
    impl QuestionStore for BrokenStore {
        async fn insert_one(&self, _question: &Question) -> Result<(), StorageError> {
            Ok(())
        }
        async fn insert_many(&self, _questions: &[Question]) -> Result<(), StorageError> {
            Ok(())
        }
        async fn sample(
            &self,
            _amount: usize,
            _filter: &QuestionFilter,
        ) -> Result<Vec<Question>, StorageError> {
            Err(StorageError::Backend("connection reset by peer".into()))
        }
    }

    fn question(text: &str, difficulty: Difficulty, status: QuestionStatus) -> Question {
        Question::new(text, vec!["a".into(), "b".into()], "a", Some(difficulty)).with_status(status)
    }

    fn sampler() -> RandomSampler {
        let store = MemoryQuestionStore::with_questions(vec![
            question("easy-1", Difficulty::Easy, QuestionStatus::Approved),
            question("easy-2", Difficulty::Easy, QuestionStatus::Approved),
            question("easy-pending", Difficulty::Easy, QuestionStatus::Pending),
            question("hard-1", Difficulty::Hard, QuestionStatus::Approved),
        ]);
        RandomSampler::new(Arc::new(store))
    }

    #[tokio::test]
    async fn negative_amount_is_rejected() {
        let err = sampler().sample(-1, &QuestionFilter::new()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn returns_fewer_when_not_enough_matches() {
        let got = sampler().sample(30, &QuestionFilter::new()).await.unwrap();
        assert_eq!(got.len(), 3);
        assert!(got.iter().all(|q| !q.status.is_pending()));
    }

    #[tokio::test]
    async fn difficulty_filter_is_anded_with_non_pending() {
        let filter = QuestionFilter::new().with_difficulty(Difficulty::Easy);
        for _ in 0..10 {
            let got = sampler().sample(10, &filter).await.unwrap();
            assert_eq!(got.len(), 2);
            assert!(got.iter().all(|q| q.question.starts_with("easy-")
                && q.question != "easy-pending"));
        }
    }

    #[tokio::test]
    async fn zero_amount_returns_empty() {
        assert!(sampler()
            .sample(0, &QuestionFilter::new())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn store_failure_hides_backend_detail() {
        let sampler = RandomSampler::new(Arc::new(BrokenStore));
        let err = sampler.sample(5, &QuestionFilter::new()).await.unwrap_err();
        assert!(matches!(err, QuizError::Store(_)));
        assert!(!err.to_string().contains("connection reset"));
    }
}
