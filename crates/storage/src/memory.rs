//! Process-local question store.
//!
//! Holds every record in a `Vec` behind an async `RwLock`. Used for
//! development runs (`--store memory`) and as the backend in tests.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::record::{Question, QuestionFilter, QuestionStatus};
use crate::traits::QuestionStore;

#[derive(Debug, Default)]
pub struct MemoryQuestionStore {
    questions: RwLock<Vec<Question>>,
}

impl MemoryQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `questions`.
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: RwLock::new(questions),
        }
    }

    /// Copy of every stored record, in insertion order.
    pub async fn all(&self) -> Vec<Question> {
        self.questions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.questions.read().await.is_empty()
    }

    /// Set the status of every record whose text equals `question`.
    /// Returns the number of records updated.
    pub async fn set_status(&self, question: &str, status: QuestionStatus) -> usize {
        let mut questions = self.questions.write().await;
        let mut updated = 0;
        for q in questions.iter_mut().filter(|q| q.question == question) {
            q.status = status.clone();
            updated += 1;
        }
        updated
    }
}

/// Uniform random choice of up to `amount` records, without replacement.
fn choose_random(candidates: &[&Question], amount: usize) -> Vec<Question> {
    let mut rng = rand::thread_rng();
    candidates
        .choose_multiple(&mut rng, amount)
        .map(|q| (*q).clone())
        .collect()
}

#[async_trait]
impl QuestionStore for MemoryQuestionStore {
    async fn insert_one(&self, question: &Question) -> Result<(), StorageError> {
        self.questions.write().await.push(question.clone());
        Ok(())
    }

    async fn insert_many(&self, questions: &[Question]) -> Result<(), StorageError> {
        if questions.is_empty() {
            return Ok(());
        }
        self.questions.write().await.extend_from_slice(questions);
        Ok(())
    }

    async fn sample(
        &self,
        amount: usize,
        filter: &QuestionFilter,
    ) -> Result<Vec<Question>, StorageError> {
        if amount == 0 {
            return Ok(Vec::new());
        }
        let questions = self.questions.read().await;
        let candidates: Vec<&Question> = questions.iter().filter(|q| filter.matches(q)).collect();
        Ok(choose_random(&candidates, amount))
    }
}
