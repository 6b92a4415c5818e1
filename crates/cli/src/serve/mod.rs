//! `quizgen serve` -- HTTP JSON API for quiz questions.
//!
//! Exposes the random sampler and the AI generation pipeline as an async
//! HTTP service using `axum` + `tokio`.
//!
//! Endpoints:
//! - GET /health                   - Server status
//! - GET /api/v1/questions/random  - Random reviewed questions (`amount`, `difficulty`)
//! - GET /api/v1/questions/ai      - Generate and store questions (`topic`, `amount`)
//!
//! All responses use Content-Type: application/json. Error bodies are
//! `{"message": "..."}` and never carry internal error detail.

mod handlers;
mod query;
mod state;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use quizgen_core::{Config, GeminiClient, GenerationPipeline, RandomSampler};
use quizgen_storage::QuestionStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use self::handlers::{
    handle_ai_questions, handle_health, handle_not_found, handle_random_questions,
};
use self::state::AppState;

/// Construct a JSON response `{"message": ...}` with the given status code.
fn json_message(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({ "message": message })))
}

/// Build the application router around `state`.
pub(crate) fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/api/v1/questions/random", get(handle_random_questions))
        .route("/api/v1/questions/ai", get(handle_ai_questions))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the given port.
pub async fn start_server(
    config: &Config,
    store: Arc<dyn QuestionStore>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.ai.api_key.is_none() {
        tracing::warn!("API_KEY is not set; /api/v1/questions/ai will fail until it is configured");
    }

    let client = Arc::new(GeminiClient::new(&config.ai));
    let state = Arc::new(AppState {
        pipeline: GenerationPipeline::new(client, store.clone()),
        sampler: RandomSampler::new(store),
    });

    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(model = %config.ai.model, "quizgen listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
