//! HTTP route handlers: health and the two question endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quizgen_core::QuizError;
use quizgen_storage::QuestionFilter;

use super::json_message;
use super::query;
use super::state::AppState;

/// Message returned to callers when the random endpoint fails internally.
const RANDOM_FAILURE_MESSAGE: &str = "Error fetching random questions";

/// Raw query pairs in request order. Repeated keys are accepted here and
/// resolved by [`query::single`].
type QueryPairs = Query<Vec<(String, String)>>;

/// Render an error and its cause chain on one line for the server log.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> impl IntoResponse {
    json_message(StatusCode::NOT_FOUND, "not found")
}

/// GET /health
pub(crate) async fn handle_health() -> impl IntoResponse {
    let response = serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(response))
}

/// GET /api/v1/questions/random?amount=<int>&difficulty=<easy|medium|hard>
pub(crate) async fn handle_random_questions(
    State(state): State<Arc<AppState>>,
    Query(params): QueryPairs,
) -> Response {
    let amount = query::random_amount(query::single(&params, "amount"));
    let difficulty = match query::difficulty(query::single(&params, "difficulty")) {
        Ok(d) => d,
        Err(message) => return json_message(StatusCode::BAD_REQUEST, &message).into_response(),
    };

    let filter = match difficulty {
        Some(d) => QuestionFilter::new().with_difficulty(d),
        None => QuestionFilter::new(),
    };

    match state.sampler.sample(amount, &filter).await {
        Ok(results) => {
            let response = serde_json::json!({
                "message": "Random questions delivered successfully",
                "results": results,
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e @ QuizError::Validation(_)) => {
            json_message(StatusCode::BAD_REQUEST, &e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!(error = %error_chain(&e), "error fetching random questions");
            json_message(StatusCode::INTERNAL_SERVER_ERROR, RANDOM_FAILURE_MESSAGE).into_response()
        }
    }
}

/// GET /api/v1/questions/ai?topic=<string>&amount=<int>
///
/// Every failure (validation, AI, parse, store) is reported as 400 with the
/// error's public message.
pub(crate) async fn handle_ai_questions(
    State(state): State<Arc<AppState>>,
    Query(params): QueryPairs,
) -> Response {
    let topic = query::topic(query::single(&params, "topic"));
    let amount = query::ai_amount(query::single(&params, "amount"));

    match state.pipeline.generate(topic, amount).await {
        Ok(results) => {
            let response = serde_json::json!({
                "message": "Random questions delivered successfully.",
                "results": results,
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            if e.is_validation() {
                tracing::warn!(error = %e, topic, "rejected question generation request");
            } else {
                tracing::error!(error = %error_chain(&e), topic, amount, "error generating the questions");
            }
            json_message(StatusCode::BAD_REQUEST, &e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizgen_core::AiError;

    #[test]
    fn error_chain_includes_hidden_cause() {
        let err = QuizError::AiService(AiError::Api {
            status: 429,
            message: "quota exceeded".into(),
        });
        let chain = error_chain(&err);
        assert!(chain.starts_with("The AI service could not generate a question."));
        assert!(chain.contains("quota exceeded"));
        assert!(!err.to_string().contains("quota"));
    }
}
