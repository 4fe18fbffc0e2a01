//! Integration tests for `GeminiClient` using wiremock HTTP mocks.

use vidpulse_classifier::{ClassifierError, GeminiClient};
use vidpulse_core::Stance;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> GeminiClient {
    GeminiClient::with_base_url("test-key", 30, "vidpulse-test/0", base_url)
        .expect("client construction should not fail")
}

fn reply_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {"content": {"parts": [{"text": text}]}}
        ]
    })
}

#[tokio::test]
async fn classify_maps_agree_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .and(body_string_contains("Only respond with one word"))
        .and(body_string_contains("This video nails it"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("AGREE")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stance = client
        .classify("This video nails it")
        .await
        .expect("classification should succeed");

    assert_eq!(stance, Stance::Agree);
}

#[tokio::test]
async fn classify_maps_disagree_reply_inside_prose() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply_body("I think the creator is wrong, DISAGREE.")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stance = client.classify("some comment").await.expect("classify");

    assert_eq!(stance, Stance::Disagree);
}

#[tokio::test]
async fn classify_defaults_to_neutral_without_keyword() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reply_body("neutral-ish, hard to say")),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stance = client.classify("some comment").await.expect("classify");

    assert_eq!(stance, Stance::Neutral);
}

#[tokio::test]
async fn classify_defaults_to_neutral_when_no_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let stance = client.classify("some comment").await.expect("classify");

    assert_eq!(stance, Stance::Neutral);
}

#[tokio::test]
async fn rejected_api_key_maps_to_invalid_credential() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{"reason": "API_KEY_INVALID"}]
        }
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .classify("some comment")
        .await
        .expect_err("rejected key should be an error");

    assert!(matches!(err, ClassifierError::InvalidCredential));
}

#[tokio::test]
async fn other_service_errors_stay_comment_scoped() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 429,
            "message": "Resource has been exhausted (e.g. check quota).",
            "status": "RESOURCE_EXHAUSTED"
        }
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .classify("some comment")
        .await
        .expect_err("429 should be an error");

    match err {
        ClassifierError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(
                message.contains("exhausted"),
                "unexpected message: {message}"
            );
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
