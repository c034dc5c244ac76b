// src/api/http/verify.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::api::types::{ApiResponse, VerifyRequest, VerifyResponse};
use crate::api::validation::{parse_body, validate_verify};
use crate::identity::VerificationOutcome;
use crate::state::AppState;

/// Check a World ID proof and, on success, record the user as verified.
pub async fn verify_handler(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        let request = validate_verify(parse_body(payload)?)?;

        let outcome = app_state
            .verifier
            .verify(&request.proof, &request.action, request.signal.as_deref())
            .await
            .into_api_error("Server error during verification")?;

        match outcome {
            VerificationOutcome::Verified { nullifier_hash } => {
                app_state
                    .store
                    .mark_verified(&nullifier_hash)
                    .await
                    .into_api_error("Failed to record verification")?;
                info!("User {} verified", nullifier_hash);

                Ok(ApiResponse::with_message(
                    "Verification successful",
                    VerifyResponse {
                        verified: true,
                        nullifier_hash,
                    },
                ))
            }
            VerificationOutcome::Rejected { code } => {
                Err(ApiError::bad_request("Verification failed").with_detail(code))
            }
        }
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}
