// src/api/types.rs
// Request and response bodies. Wire names are camelCase except where the
// World ID payload dictates snake_case.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::WorldIdProof;
use crate::persona::PersonaConfig;
use crate::profile::{PersonalityProfile, ProfileSubmission, Question, TestAnswer};
use crate::store::{ChatMessage, Sender};

/// Success half of the envelope: `{success: true, message?, data?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// ── Health / questionnaire

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub environment: String,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: &'static [Question],
}

// ── World ID

#[derive(Debug, Default, Deserialize)]
pub struct VerifyRequest {
    pub payload: Option<WorldIdProof>,
    pub action: Option<String>,
    pub signal: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
    pub nullifier_hash: String,
}

// ── Profile

/// Either the pre-aggregated profile (`testResults`) or raw `answers`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultsRequest {
    pub nullifier_hash: Option<String>,
    pub test_results: Option<ProfileSubmission>,
    pub answers: Option<Vec<TestAnswer>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub nullifier_hash: String,
    pub personality_profile: PersonalityProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaResponse {
    pub nullifier_hash: String,
    pub persona: PersonaConfig,
    pub greeting: String,
}

// ── Chat

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub nullifier_hash: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SentMessage {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for SentMessage {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            content: message.content,
            timestamp: message.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub user_message: SentMessage,
    pub ai_message: SentMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
    pub before: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryMessage {
    pub id: String,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<ChatMessage> for HistoryMessage {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            content: message.content,
            timestamp: message.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub messages: Vec<HistoryMessage>,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_before: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_omits_empty_fields() {
        let value = serde_json::to_value(ApiResponse::ok(json!({"a": 1}))).unwrap();
        assert_eq!(value, json!({"success": true, "data": {"a": 1}}));

        let value = serde_json::to_value(ApiResponse::with_message("done", 5)).unwrap();
        assert_eq!(value["message"], "done");
    }

    #[test]
    fn test_test_results_request_accepts_either_shape() {
        let req: TestResultsRequest = serde_json::from_value(json!({
            "nullifierHash": "0x1",
            "answers": [{"questionId": "openness_1", "answer": 4}]
        }))
        .unwrap();
        assert!(req.test_results.is_none());
        assert_eq!(req.answers.map(|a| a.len()), Some(1));

        let req: TestResultsRequest = serde_json::from_value(json!({
            "nullifierHash": "0x1",
            "testResults": {"openness": 4}
        }))
        .unwrap();
        assert!(req.test_results.is_some());
    }

    #[test]
    fn test_chat_response_is_camel_case() {
        let msg = || SentMessage {
            id: "1".into(),
            content: "hi".into(),
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(ChatResponse {
            user_message: msg(),
            ai_message: msg(),
        })
        .unwrap();
        assert!(value.get("userMessage").is_some());
        assert!(value.get("aiMessage").is_some());
    }
}
