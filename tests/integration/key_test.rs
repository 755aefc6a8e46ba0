//! Integration tests for the live key test

use super::*;
use dreamweaver_client::{Credential, KeyTestOutcome, KeyValidation};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::body_partial_json;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn test_key_test_success() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 5,
            "messages": [{"role": "user", "content": "Say 'test' only"}]
        })))
        .respond_with(completion("test"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let outcome = client.test_api_key(&credential()).await;

    assert_eq!(outcome, KeyTestOutcome::Success);
    assert_eq!(client.metrics().get_metrics().key_tests_passed, 1);
}

#[tokio::test]
async fn test_key_test_status_outcomes() {
    let cases = [
        (401, KeyTestOutcome::InvalidKey),
        (403, KeyTestOutcome::InsufficientPermissions),
        (429, KeyTestOutcome::RateLimited),
        (
            500,
            KeyTestOutcome::ApiError("HTTP 500: Internal Server Error".to_string()),
        ),
    ];

    for (status, expected) in cases {
        let mock_server = setup_mock_server().await;
        chat_completions()
            .respond_with(error_response(status, "The server had an error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let outcome = client_for(&mock_server).test_api_key(&credential()).await;

        assert_eq!(outcome, expected, "status {}", status);
    }
}

#[tokio::test]
async fn test_key_test_error_without_body_uses_reason_phrase() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let outcome = client_for(&mock_server).test_api_key(&credential()).await;

    assert_eq!(
        outcome,
        KeyTestOutcome::ApiError("HTTP 502: Bad Gateway".to_string())
    );
}

#[tokio::test]
async fn test_key_test_uses_its_own_timeout() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(completion("test").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .key_test_timeout(Duration::from_millis(500))
        .build()
        .unwrap();

    assert_eq!(
        client.test_api_key(&credential()).await,
        KeyTestOutcome::Timeout
    );
}

#[tokio::test]
async fn test_key_test_connection_refused() {
    let client = DreamweaverClient::builder()
        .base_url("http://127.0.0.1:9")
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let outcome = client.test_api_key(&credential()).await;

    assert!(matches!(outcome, KeyTestOutcome::ApiError(ref m) if m.starts_with("Network error: ")));
}

#[tokio::test]
async fn test_key_test_sends_whatever_key_it_is_given() {
    let mock_server = setup_mock_server().await;

    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::header("Authorization", "Bearer sk-short"))
        .respond_with(error_response(401, "Incorrect API key provided"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let key = Credential::new("sk-short");

    assert_eq!(client.validate_api_key("sk-short"), KeyValidation::TooShort);
    assert_eq!(client.test_api_key(&key).await, KeyTestOutcome::InvalidKey);
}

#[tokio::test]
async fn test_key_test_unresolvable_host() {
    let client = DreamweaverClient::builder()
        .base_url("https://dreamweaver-test.invalid/v1")
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    assert_eq!(
        client.test_api_key(&credential()).await,
        KeyTestOutcome::NoInternet
    );
}
