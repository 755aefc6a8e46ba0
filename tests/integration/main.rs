//! Integration tests using WireMock
//!
//! These tests drive the client over real HTTP against a local mock server,
//! covering serialization, authentication headers and status mapping.

mod key_test;
mod story_generation;

use std::time::Duration;

use dreamweaver_client::{Credential, DreamweaverClient, DreamweaverClientBuilder};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Key accepted by the format check.
pub const TEST_KEY: &str = "sk-test_key_1234567890";

/// Helper to create a mock server.
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Helper to build a client pointing at the mock server.
pub fn client_for(server: &MockServer) -> DreamweaverClient {
    builder_for(server).build().unwrap()
}

/// Helper to start a client builder pointing at the mock server.
pub fn builder_for(server: &MockServer) -> DreamweaverClientBuilder {
    DreamweaverClient::builder()
        .base_url(server.uri())
        .connect_timeout(Duration::from_secs(2))
}

/// The credential matching [`TEST_KEY`].
pub fn credential() -> Credential {
    Credential::new(TEST_KEY)
}

/// Helper to create an authenticated chat-completions mock.
pub fn chat_completions() -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", format!("Bearer {}", TEST_KEY).as_str()))
}

/// Helper to create a success response template.
pub fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-integration-123",
        "object": "chat.completion",
        "created": 1_677_652_288,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 120,
            "completion_tokens": 80,
            "total_tokens": 200
        }
    }))
}

/// Helper to create an error response template.
pub fn error_response(status: u16, message: &str) -> ResponseTemplate {
    let body: Value = json!({
        "error": {
            "message": message,
            "type": "invalid_request_error"
        }
    });
    ResponseTemplate::new(status).set_body_json(body)
}
