//! Conformance test suite for `QuestionStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `QuestionStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **Insert**: single and bulk inserts are visible to sampling, empty
//!   batches are accepted, extra fields survive storage
//! - **Sample**: pending exclusion, filter conjunction, short results,
//!   no duplicates within one draw
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function that
//! creates a fresh, empty store for each test:
//!
//! ```ignore
//! use quizgen_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn memory_conformance() {
//!     let report = run_conformance_suite(|| async { MemoryQuestionStore::new() }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod insert;
mod sample;

use std::fmt;
use std::future::Future;

use crate::record::{Difficulty, Question, QuestionStatus};
use crate::QuestionStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category ("insert" or "sample").
    pub category: String,
    pub name: String,
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in self.results.iter().filter(|r| !r.passed) {
            writeln!(
                f,
                "  FAIL [{}/{}]: {}",
                r.category,
                r.name,
                r.message.as_deref().unwrap_or("(no message)")
            )?;
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(insert::run_insert_tests(&factory).await);
    results.extend(sample::run_sample_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_question(text: &str, difficulty: Difficulty, status: QuestionStatus) -> Question {
    Question::new(
        text,
        vec!["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
        "alpha",
        Some(difficulty),
    )
    .with_status(status)
}

/// Every non-pending question currently stored, sorted by text.
async fn sample_all<S: QuestionStore>(store: &S) -> Result<Vec<Question>, String> {
    let mut all = store
        .sample(10_000, &crate::QuestionFilter::new())
        .await
        .map_err(|e| format!("sample failed: {}", e))?;
    all.sort_by(|a, b| a.question.cmp(&b.question));
    Ok(all)
}

fn texts(questions: &[Question]) -> Vec<&str> {
    let mut texts: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
    texts.sort();
    texts
}
