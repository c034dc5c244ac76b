// src/api/http/handlers.rs

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::types::{ApiResponse, HealthResponse, QuestionsResponse};
use crate::profile::QUESTIONNAIRE;
use crate::state::AppState;

pub async fn health_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        environment: app_state.config.environment.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn questions_handler() -> impl IntoResponse {
    ApiResponse::ok(QuestionsResponse {
        questions: QUESTIONNAIRE,
    })
}
