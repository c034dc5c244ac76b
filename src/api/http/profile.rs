// src/api/http/profile.rs
// Questionnaire results in, stored profile and derived persona out.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::auth::{require_verified_user, USER_NOT_FOUND};
use crate::api::error::{ApiResult, IntoApiError, IntoApiErrorOption};
use crate::api::types::{ApiResponse, PersonaResponse, ProfileResponse, TestResultsRequest};
use crate::api::validation::{parse_body, validate_test_results};
use crate::state::AppState;

/// The user row can vanish between the auth check and the update.
fn ensure_saved(saved: bool, nullifier_hash: &str) -> ApiResult<()> {
    if !saved {
        warn!("Profile for {} not stored, user row is gone", nullifier_hash);
    }
    saved.then_some(()).ok_or_not_found(USER_NOT_FOUND)
}

pub async fn store_test_results_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<TestResultsRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let (nullifier_hash, profile) = validate_test_results(parse_body(payload)?)?;
        require_verified_user(&app_state.store, &nullifier_hash).await?;

        let saved = app_state
            .store
            .save_profile(&nullifier_hash, &profile)
            .await
            .into_api_error("Server error while storing test results")?;
        ensure_saved(saved, &nullifier_hash)?;
        info!("Stored personality profile for {}", nullifier_hash);

        Ok(ApiResponse::with_message(
            "Test results stored successfully",
            ProfileResponse {
                nullifier_hash,
                personality_profile: profile,
            },
        ))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

pub async fn get_profile_handler(
    State(app_state): State<Arc<AppState>>,
    Path(nullifier_hash): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let user = require_verified_user(&app_state.store, &nullifier_hash).await?;
        let profile = user
            .profile
            .ok_or_not_found("Personality profile not found for this user")?;

        Ok(ApiResponse::ok(ProfileResponse {
            nullifier_hash,
            personality_profile: profile,
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

/// Persona for the chat screen, with an opening line already in its voice.
pub async fn get_persona_handler(
    State(app_state): State<Arc<AppState>>,
    Path(nullifier_hash): Path<String>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let user = require_verified_user(&app_state.store, &nullifier_hash).await?;
        let persona = app_state.chat_service.persona_for(&user);
        let greeting = app_state.chat_service.greeting(&persona).await;

        Ok(ApiResponse::ok(PersonaResponse {
            nullifier_hash,
            persona,
            greeting,
        }))
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_unsaved_profile_is_not_found() {
        assert!(ensure_saved(true, "0xabc").is_ok());

        let error = ensure_saved(false, "0xabc").unwrap_err();
        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
        assert_eq!(error.message, USER_NOT_FOUND);
    }
}
