use std::collections::HashSet;
use std::future::Future;

use super::{make_question, texts, TestResult};
use crate::record::{Difficulty, QuestionStatus};
use crate::{QuestionFilter, QuestionStore};

pub(super) async fn run_sample_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "sample",
            "pending_is_never_returned",
            pending_is_never_returned(factory).await,
        ),
        TestResult::from_result(
            "sample",
            "status_filter_cannot_select_pending",
            status_filter_cannot_select_pending(factory).await,
        ),
        TestResult::from_result(
            "sample",
            "difficulty_filter_is_anded",
            difficulty_filter_is_anded(factory).await,
        ),
        TestResult::from_result(
            "sample",
            "amount_limits_without_duplicates",
            amount_limits_without_duplicates(factory).await,
        ),
        TestResult::from_result(
            "sample",
            "short_result_is_not_an_error",
            short_result_is_not_an_error(factory).await,
        ),
        TestResult::from_result(
            "sample",
            "zero_amount_returns_empty",
            zero_amount_returns_empty(factory).await,
        ),
    ]
}

async fn seeded<S, F, Fut>(factory: &F) -> Result<S, String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let batch = vec![
        make_question("easy-approved", Difficulty::Easy, QuestionStatus::Approved),
        make_question("easy-pending", Difficulty::Easy, QuestionStatus::Pending),
        make_question("hard-approved", Difficulty::Hard, QuestionStatus::Approved),
        make_question(
            "easy-live",
            Difficulty::Easy,
            QuestionStatus::Other("live".to_string()),
        ),
        make_question("medium-pending", Difficulty::Medium, QuestionStatus::Pending),
    ];
    s.insert_many(&batch).await.map_err(|e| e.to_string())?;
    Ok(s)
}

async fn pending_is_never_returned<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = seeded(factory).await?;
    let got = s
        .sample(100, &QuestionFilter::new())
        .await
        .map_err(|e| e.to_string())?;
    if texts(&got) != vec!["easy-approved", "easy-live", "hard-approved"] {
        return Err(format!("unexpected sample {:?}", texts(&got)));
    }
    Ok(())
}

async fn status_filter_cannot_select_pending<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = seeded(factory).await?;
    let filter =
        QuestionFilter::new().with_field("status", serde_json::json!(QuestionStatus::PENDING));
    let got = s.sample(100, &filter).await.map_err(|e| e.to_string())?;
    if !got.is_empty() {
        return Err(format!("pending leaked through filter: {:?}", texts(&got)));
    }
    Ok(())
}

async fn difficulty_filter_is_anded<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = seeded(factory).await?;
    let filter = QuestionFilter::new().with_difficulty(Difficulty::Easy);
    let got = s.sample(100, &filter).await.map_err(|e| e.to_string())?;
    if texts(&got) != vec!["easy-approved", "easy-live"] {
        return Err(format!("unexpected sample {:?}", texts(&got)));
    }
    let medium = QuestionFilter::new().with_difficulty(Difficulty::Medium);
    let got = s.sample(100, &medium).await.map_err(|e| e.to_string())?;
    if !got.is_empty() {
        return Err(format!("expected no medium questions, got {:?}", texts(&got)));
    }
    Ok(())
}

async fn amount_limits_without_duplicates<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = seeded(factory).await?;
    let got = s
        .sample(2, &QuestionFilter::new())
        .await
        .map_err(|e| e.to_string())?;
    if got.len() != 2 {
        return Err(format!("expected 2 questions, got {}", got.len()));
    }
    let unique: HashSet<&str> = got.iter().map(|q| q.question.as_str()).collect();
    if unique.len() != 2 {
        return Err(format!("duplicate in sample {:?}", texts(&got)));
    }
    Ok(())
}

async fn short_result_is_not_an_error<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = seeded(factory).await?;
    let filter = QuestionFilter::new().with_difficulty(Difficulty::Hard);
    let got = s
        .sample(30, &filter)
        .await
        .map_err(|e| format!("short result must not fail: {}", e))?;
    if texts(&got) != vec!["hard-approved"] {
        return Err(format!("unexpected sample {:?}", texts(&got)));
    }
    Ok(())
}

async fn zero_amount_returns_empty<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = seeded(factory).await?;
    let got = s
        .sample(0, &QuestionFilter::new())
        .await
        .map_err(|e| e.to_string())?;
    if !got.is_empty() {
        return Err(format!("expected empty sample, got {:?}", texts(&got)));
    }
    Ok(())
}
