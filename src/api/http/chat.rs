// src/api/http/chat.rs

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::auth::require_verified_user;
use crate::api::error::{ApiResult, IntoApiError, IntoApiErrorOption};
use crate::api::types::{ApiResponse, ChatRequest, ChatResponse, HistoryQuery, HistoryResponse};
use crate::api::validation::{parse_before, parse_body, parse_query, validate_chat, Before};
use crate::state::AppState;
use crate::store::{HistoryCursor, SqliteStore};

pub async fn send_message_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let (nullifier_hash, message) = validate_chat(parse_body(payload)?)?;
        let user = require_verified_user(&app_state.store, &nullifier_hash).await?;

        let exchange = app_state
            .chat_service
            .send(&user, &message)
            .await
            .into_api_error("Server error while sending message")?;

        Ok(ApiResponse::ok(ChatResponse {
            user_message: exchange.user_message.into(),
            ai_message: exchange.ai_message.into(),
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

async fn resolve_cursor(
    store: &SqliteStore,
    nullifier_hash: &str,
    before: Option<Before>,
) -> ApiResult<Option<HistoryCursor>> {
    match before {
        None => Ok(None),
        Some(Before::Time(at)) => Ok(Some(HistoryCursor::before_time(at))),
        Some(Before::Message(id)) => store
            .cursor_for_message(nullifier_hash, &id)
            .await
            .into_api_error("Server error while retrieving chat history")?
            .ok_or_bad_request(&format!("Invalid before cursor: {id}"))
            .map(Some),
    }
}

/// Newest first; `hasMore` is set whenever a full page came back, and
/// `nextBefore` then names the message to page past.
pub async fn get_chat_history(
    State(app_state): State<Arc<AppState>>,
    Path(nullifier_hash): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let query = parse_query(query)?;
        require_verified_user(&app_state.store, &nullifier_hash).await?;

        let limit = app_state.config.history_limit(query.limit);
        let before = resolve_cursor(
            &app_state.store,
            &nullifier_hash,
            parse_before(query.before.as_deref()),
        )
        .await?;

        let messages = app_state
            .store
            .history(&nullifier_hash, limit, before)
            .await
            .into_api_error("Server error while retrieving chat history")?;

        let has_more = messages.len() == limit as usize;
        let next_before = messages
            .last()
            .filter(|_| has_more)
            .map(|message| message.id.clone());
        Ok(ApiResponse::ok(HistoryResponse {
            messages: messages.into_iter().map(Into::into).collect(),
            has_more,
            next_before,
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
