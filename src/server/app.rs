use std::sync::Arc;

use anyhow::Context;
use axum::http::header;
use axum::response::IntoResponse;
use axum::{extract::FromRef, http::StatusCode, routing::get, Json, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quiz_router, ApiResponse};
use serde_json::json;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::services::{CategoryService, QuestionService, QuizService, RandomSource};
use crate::settings::Settings;

#[derive(FromRef, Clone)]
pub struct AppState {
    categories: CategoryService,
    quizzes: QuizService,
    questions: QuestionService,
}

impl AppState {
    pub fn new(pool: SqlitePool, random: Arc<dyn RandomSource>) -> Self {
        Self {
            categories: CategoryService::new(pool.clone()),
            quizzes: QuizService::new(pool.clone()),
            questions: QuestionService::new(pool, random),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(quiz_router(state.clone()))
        .merge(questions_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
        })
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(pool: SqlitePool, settings: &Settings) -> anyhow::Result<()> {
    let state = AppState::new(pool, settings.random_source());
    let app = router(state);

    let addr = settings.bind_addr.as_str();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn metrics() -> ApiResponse<impl IntoResponse> {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder
        .encode(&metrics, &mut buf)
        .context("Failed to encode metrics")?;
    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_owned())],
        buf,
    ))
}
