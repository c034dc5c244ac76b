// src/api/validation.rs
// Request-shape checks that run before any store access.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use chrono::{DateTime, Utc};

use super::error::{missing_param_error, ApiError, ApiResult};
use super::types::{ChatRequest, TestResultsRequest, VerifyRequest};
use crate::identity::WorldIdProof;
use crate::profile::{extract_profile, PersonalityProfile};

/// Unwrap a JSON body, turning extractor rejections into the error envelope.
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(format!("Invalid request body: {}", rejection.body_text())))
}

pub fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> ApiResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::bad_request(format!("Invalid query: {}", rejection.body_text())))
}

/// A present, non-blank string parameter.
pub fn require_param(value: Option<String>, name: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing_param_error(name)),
    }
}

#[derive(Debug)]
pub struct ValidVerify {
    pub proof: WorldIdProof,
    pub action: String,
    pub signal: Option<String>,
}

pub fn validate_verify(req: VerifyRequest) -> ApiResult<ValidVerify> {
    let proof = req.payload.ok_or_else(|| missing_param_error("payload"))?;
    let action = require_param(req.action, "action")?;
    if !proof.is_complete() {
        return Err(ApiError::bad_request("Incomplete payload data"));
    }
    Ok(ValidVerify {
        proof,
        action,
        signal: req.signal.filter(|s| !s.is_empty()),
    })
}

/// Resolve the submitted profile; `testResults` wins when both shapes are sent.
pub fn validate_test_results(req: TestResultsRequest) -> ApiResult<(String, PersonalityProfile)> {
    let nullifier_hash = require_param(req.nullifier_hash, "nullifierHash")?;

    let profile = match (req.test_results, req.answers) {
        (Some(submission), _) => submission.validate()?,
        (None, Some(answers)) => extract_profile(&answers)?,
        (None, None) => return Err(missing_param_error("testResults")),
    };

    Ok((nullifier_hash, profile))
}

pub fn validate_chat(req: ChatRequest) -> ApiResult<(String, String)> {
    let nullifier_hash = require_param(req.nullifier_hash, "nullifierHash")?;
    let message = req.message.ok_or_else(|| missing_param_error("message"))?;
    if message.trim().is_empty() {
        return Err(ApiError::bad_request("Message cannot be empty"));
    }
    Ok((nullifier_hash, message))
}

/// History cursor as sent by the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Before {
    /// RFC 3339 instant; messages stored at or after it are skipped.
    Time(DateTime<Utc>),
    /// Id of the oldest message on the previous page.
    Message(String),
}

/// Anything that is not an RFC 3339 timestamp is taken as a message id.
pub fn parse_before(before: Option<&str>) -> Option<Before> {
    let before = before.map(str::trim).filter(|s| !s.is_empty())?;
    Some(match DateTime::parse_from_rfc3339(before) {
        Ok(at) => Before::Time(at.with_timezone(&Utc)),
        Err(_) => Before::Message(before.to_string()),
    })
}
