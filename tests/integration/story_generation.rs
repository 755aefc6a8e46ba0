//! Integration tests for story generation

use super::*;
use dreamweaver_client::{
    build_prompt, generate_template, Credential, FallbackReason, GenerationResult, StoryMode,
    StoryRequest,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::body_partial_json;
use wiremock::ResponseTemplate;

fn bedtime() -> StoryRequest {
    StoryRequest::with_mode("Mia and Leo", "Luna the owl", StoryMode::Bedtime)
}

fn bedtime_template() -> String {
    generate_template(Some(StoryMode::Bedtime), "Mia and Leo", "Luna the owl", None)
}

#[tokio::test]
async fn test_generate_returns_ai_story() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 600,
            "stream": false,
            "messages": [{
                "role": "user",
                "content": build_prompt(Some(StoryMode::Bedtime), "Mia and Leo", "Luna the owl", None)
            }]
        })))
        .respond_with(completion("  Once upon a time, Mia and Leo met Luna.\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.generate(&credential(), &bedtime()).await;

    assert_eq!(
        result,
        GenerationResult::ai("Once upon a time, Mia and Leo met Luna.")
    );
    assert_eq!(client.metrics().get_metrics().total_tokens(), 200);
}

#[tokio::test]
async fn test_generate_sends_custom_headers() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .and(wiremock::matchers::header("X-App", "dreamweaver"))
        .respond_with(completion("A story"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .header("X-App", "dreamweaver")
        .build()
        .unwrap();

    assert!(client.generate(&credential(), &bedtime()).await.is_ai_generated());
}

#[tokio::test]
async fn test_generate_falls_back_on_error_statuses() {
    let cases = [
        (401, FallbackReason::InvalidKey),
        (403, FallbackReason::AccessDenied),
        (429, FallbackReason::RateLimited),
        (500, FallbackReason::ApiError),
        (503, FallbackReason::ApiError),
    ];

    for (status, reason) in cases {
        let mock_server = setup_mock_server().await;
        chat_completions()
            .respond_with(error_response(status, "nope"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server)
            .generate(&credential(), &bedtime())
            .await;

        assert_eq!(
            result,
            GenerationResult::fallback(bedtime_template(), reason),
            "status {}",
            status
        );
    }
}

#[tokio::test]
async fn test_generate_falls_back_on_blank_content() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(completion(" \n\t "))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .generate(&credential(), &bedtime())
        .await;

    assert_eq!(result.story(), Some(bedtime_template().as_str()));
    assert_eq!(
        result.warning(),
        Some("AI returned empty response. Used template story instead.")
    );
}

#[tokio::test]
async fn test_generate_falls_back_on_malformed_body() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .generate(&credential(), &bedtime())
        .await;

    assert_eq!(
        result.warning(),
        Some(FallbackReason::Unexpected.warning())
    );
}

#[tokio::test]
async fn test_generate_times_out() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(completion("too late").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .timeout(Duration::from_millis(500))
        .build()
        .unwrap();
    let result = client.generate(&credential(), &bedtime()).await;

    assert_eq!(
        result,
        GenerationResult::fallback(bedtime_template(), FallbackReason::Timeout)
    );
}

#[tokio::test]
async fn test_generate_without_key_never_calls_api() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let blank = client.generate(&Credential::none(), &bedtime()).await;
    assert_eq!(blank, GenerationResult::template(bedtime_template()));

    let malformed = client.generate(&Credential::new("not-a-key"), &bedtime()).await;
    assert_eq!(
        malformed,
        GenerationResult::fallback(bedtime_template(), FallbackReason::InvalidKeyFormat)
    );
}

#[tokio::test]
async fn test_generate_holiday_story_end_to_end() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(error_response(429, "Rate limit reached"))
        .mount(&mock_server)
        .await;

    let request = StoryRequest::new("Ava", "Mario, Luigi", "Holiday").holiday("Halloween");
    let result = client_for(&mock_server)
        .generate(&credential(), &request)
        .await;

    let story = result.story().unwrap();
    assert!(story.starts_with("It was a very special Halloween, and Ava"));
    assert!(story.contains("Ava"));
    assert!(story.contains("Mario, Luigi"));
    assert!(!result.is_ai_generated());
}

#[tokio::test]
async fn test_connection_refused_falls_back() {
    let client = DreamweaverClient::builder()
        .base_url("http://127.0.0.1:9")
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let result = client.generate(&credential(), &bedtime()).await;

    assert_eq!(result.story(), Some(bedtime_template().as_str()));
    assert!(!result.is_ai_generated());
    assert!(result.warning().is_some());
}

#[tokio::test]
async fn test_abandoned_generation_records_nothing() {
    let mock_server = setup_mock_server().await;

    chat_completions()
        .respond_with(completion("never read").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let abandoned = tokio::time::timeout(
        Duration::from_millis(200),
        client.generate(&credential(), &bedtime()),
    )
    .await;

    assert!(abandoned.is_err());
    let metrics = client.metrics().get_metrics();
    assert_eq!(metrics.ai_stories, 0);
    assert_eq!(metrics.template_stories, 0);
    assert_eq!(metrics.fallback_stories, 0);
    assert!(metrics.fallbacks.is_empty());
}

#[tokio::test]
async fn test_unresolvable_host_reports_no_internet() {
    let client = DreamweaverClient::builder()
        .base_url("https://dreamweaver-test.invalid/v1")
        .connect_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let result = client.generate(&credential(), &bedtime()).await;

    assert_eq!(
        result,
        GenerationResult::fallback(bedtime_template(), FallbackReason::NoInternet)
    );
    assert_eq!(
        result.warning(),
        Some("No internet connection. Used template story instead.")
    );
}
