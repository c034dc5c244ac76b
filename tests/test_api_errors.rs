// tests/test_api_errors.rs
// Error envelopes: status, message and codes for each rejection path.


use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use test_helpers::{
    create_test_app, get, post_json, proof_payload, send, verify_user, UNREACHABLE_PROOF,
};
use youyoung::api::auth::{USER_NOT_FOUND, USER_NOT_VERIFIED};

const HASH: &str = "0xabc123";

#[tokio::test]
async fn test_verify_rejections() {
    let (app, state) = create_test_app().await;

    let (status, body) = send(&app, post_json("/api/verify", json!({"action": "youyoung-chat"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing payload parameter");

    let mut request = proof_payload("valid-proof", HASH);
    request.as_object_mut().unwrap().remove("action");
    let (status, body) = send(&app, post_json("/api/verify", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing action parameter");

    let request = json!({"payload": {"proof": "valid-proof"}, "action": "youyoung-chat"});
    let (status, body) = send(&app, post_json("/api/verify", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Incomplete payload data");

    let (status, body) = send(&app, post_json("/api/verify", proof_payload("forged", HASH))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Verification failed");
    assert_eq!(body["error"], "invalid_proof");
    assert!(state.store.get_user(HASH).await.unwrap().is_none());

    let (status, body) = send(&app, post_json("/api/verify", proof_payload(UNREACHABLE_PROOF, HASH))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Server error during verification");
}

#[tokio::test]
async fn test_malformed_json_is_enveloped() {
    let (app, _) = create_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_unknown_and_unverified_users() {
    let (app, state) = create_test_app().await;

    let (status, body) = send(&app, get(&format!("/api/profile/{HASH}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], USER_NOT_FOUND);

    state.store.upsert_user(HASH, false).await.unwrap();

    let request = json!({"nullifierHash": HASH, "answers": []});
    let (status, body) = send(&app, post_json("/api/test-results", request)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], USER_NOT_VERIFIED);

    let (status, _) = send(&app, post_json("/api/chat", json!({"nullifierHash": HASH, "message": "hi"}))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, get(&format!("/api/chat/{HASH}"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_test_results_validation() {
    let (app, state) = create_test_app().await;
    verify_user(&app, HASH).await;

    let (status, body) = send(&app, post_json("/api/test-results", json!({"nullifierHash": HASH}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing testResults parameter");

    let (status, body) = send(&app, post_json("/api/test-results", json!({"answers": []}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing nullifierHash parameter");

    let request = json!({
        "nullifierHash": HASH,
        "answers": [{"questionId": "openness_1", "answer": 6}]
    });
    let (status, body) = send(&app, post_json("/api/test-results", request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "OUT_OF_RANGE_TRAIT");

    let request = json!({
        "nullifierHash": HASH,
        "answers": [{"questionId": "neuroticism_1", "answer": "lots"}]
    });
    let (_, body) = send(&app, post_json("/api/test-results", request)).await;
    assert_eq!(body["error_code"], "NON_NUMERIC_TRAIT");

    let request = json!({
        "nullifierHash": HASH,
        "testResults": {
            "openness": 3, "conscientiousness": 3, "extraversion": 3,
            "agreeableness": 3, "neuroticism": 3,
            "memories": "not a list", "aspirations": [], "fears": []
        }
    });
    let (_, body) = send(&app, post_json("/api/test-results", request)).await;
    assert_eq!(body["error_code"], "NOT_A_LIST");

    // nothing was stored by the rejected submissions
    let user = state.store.get_user(HASH).await.unwrap().unwrap();
    assert!(user.profile.is_none());
}

#[tokio::test]
async fn test_chat_validation() {
    let (app, _) = create_test_app().await;
    verify_user(&app, HASH).await;

    let (status, body) = send(&app, post_json("/api/chat", json!({"nullifierHash": HASH, "message": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Message cannot be empty");

    let (status, body) = send(&app, post_json("/api/chat", json!({"message": "hello"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing nullifierHash parameter");

    let (_, body) = send(&app, get(&format!("/api/chat/{HASH}"))).await;
    assert_eq!(body["data"]["messages"], json!([]));
    assert_eq!(body["data"]["hasMore"], false);

    let (status, body) = send(&app, get(&format!("/api/chat/{HASH}?before=yesterday"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid before cursor: yesterday");

    let (status, body) = send(&app, get(&format!("/api/chat/{HASH}?limit=abc"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}
