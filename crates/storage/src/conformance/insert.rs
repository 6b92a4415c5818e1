use std::future::Future;

use super::{make_question, sample_all, texts, TestResult};
use crate::record::{Difficulty, QuestionStatus};
use crate::QuestionStore;

pub(super) async fn run_insert_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    vec![
        TestResult::from_result(
            "insert",
            "insert_one_is_sampled",
            insert_one_is_sampled(factory).await,
        ),
        TestResult::from_result(
            "insert",
            "insert_many_stores_every_record",
            insert_many_stores_every_record(factory).await,
        ),
        TestResult::from_result(
            "insert",
            "insert_many_empty_is_noop",
            insert_many_empty_is_noop(factory).await,
        ),
        TestResult::from_result(
            "insert",
            "extra_fields_survive_storage",
            extra_fields_survive_storage(factory).await,
        ),
    ]
}

async fn insert_one_is_sampled<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let q = make_question("single", Difficulty::Easy, QuestionStatus::Approved);
    s.insert_one(&q).await.map_err(|e| e.to_string())?;
    let all = sample_all(&s).await?;
    if all.len() != 1 || all[0].question != "single" {
        return Err(format!("expected [single], got {:?}", texts(&all)));
    }
    Ok(())
}

async fn insert_many_stores_every_record<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let batch = vec![
        make_question("b1", Difficulty::Easy, QuestionStatus::Approved),
        make_question("b2", Difficulty::Medium, QuestionStatus::Approved),
        make_question("b3", Difficulty::Hard, QuestionStatus::Approved),
    ];
    s.insert_many(&batch).await.map_err(|e| e.to_string())?;
    let all = sample_all(&s).await?;
    if texts(&all) != vec!["b1", "b2", "b3"] {
        return Err(format!("expected [b1, b2, b3], got {:?}", texts(&all)));
    }
    Ok(())
}

async fn insert_many_empty_is_noop<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.insert_many(&[])
        .await
        .map_err(|e| format!("empty batch must succeed, got {}", e))?;
    let all = sample_all(&s).await?;
    if !all.is_empty() {
        return Err(format!("expected empty store, got {:?}", texts(&all)));
    }
    Ok(())
}

async fn extra_fields_survive_storage<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: QuestionStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let mut q = make_question("with-extra", Difficulty::Medium, QuestionStatus::Approved);
    q.extra.insert(
        "explanation".to_string(),
        serde_json::json!("alpha is first"),
    );
    s.insert_one(&q).await.map_err(|e| e.to_string())?;
    let all = sample_all(&s).await?;
    let stored = all.first().ok_or("stored question not returned")?;
    if stored.extra.get("explanation") != Some(&serde_json::json!("alpha is first")) {
        return Err(format!("extra field lost: {:?}", stored.extra));
    }
    if stored.options != q.options || stored.correct_answer != q.correct_answer {
        return Err("typed fields changed in storage".to_string());
    }
    Ok(())
}
