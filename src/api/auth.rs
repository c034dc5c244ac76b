// src/api/auth.rs

use tracing::debug;

use super::error::{missing_param_error, ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::store::{SqliteStore, User};

pub const USER_NOT_FOUND: &str = "User not found. Please verify with World ID first.";
pub const USER_NOT_VERIFIED: &str = "User is not verified. Please complete World ID verification first.";

/// The caller must exist and have passed World ID verification.
pub async fn require_verified_user(store: &SqliteStore, nullifier_hash: &str) -> ApiResult<User> {
    if nullifier_hash.trim().is_empty() {
        return Err(missing_param_error("nullifierHash"));
    }

    let user = store
        .get_user(nullifier_hash)
        .await
        .into_api_error("Server error during authentication check")?
        .ok_or_not_found(USER_NOT_FOUND)?;

    if !user.is_verified {
        debug!("Rejecting unverified user {}", nullifier_hash);
        return Err(ApiError::forbidden(USER_NOT_VERIFIED));
    }

    Ok(user)
}
