// src/api/http/mod.rs
// HTTP router composition for REST API endpoints

pub mod chat;
pub mod handlers;
pub mod profile;
pub mod verify;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::state::AppState;
use chat::{get_chat_history, send_message_handler};
use handlers::{health_handler, questions_handler};
use profile::{get_persona_handler, get_profile_handler, store_test_results_handler};
use verify::verify_handler;

/// Routes nested under /api
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/questions", get(questions_handler))
        .route("/verify", post(verify_handler))
        .route("/test-results", post(store_test_results_handler))
        .route("/profile/{nullifier_hash}", get(get_profile_handler))
        .route("/persona/{nullifier_hash}", get(get_persona_handler))
        .route("/chat", post(send_message_handler))
        .route("/chat/{nullifier_hash}", get(get_chat_history))
}

/// `*` allows any origin without credentials; anything else is a single exact origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if origin.trim() == "*" {
        return base.allow_origin(Any);
    }

    match HeaderValue::from_str(origin.trim()) {
        Ok(value) => base.allow_origin(value).allow_credentials(true),
        Err(_) => {
            warn!("Invalid CORS origin '{}', allowing any origin", origin);
            base.allow_origin(Any)
        }
    }
}

/// Full application: health at the root, API under /api, tracing and CORS layers.
pub fn app(app_state: Arc<AppState>) -> Router {
    let cors = cors_layer(&app_state.config.cors_origin);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
