//! Credential validation and live key testing.

use std::sync::Arc;
use tracing::instrument;

use crate::auth::{validate_api_key, Credential, KeyValidation};
use crate::config::StoryConfig;
use crate::observability::{redact, MetricsCollector};
use crate::types::chat::ChatRequest;
use crate::types::story::KeyTestOutcome;

use super::ChatService;

/// Message sent by the key test.
pub const KEY_TEST_PROMPT: &str = "Say 'test' only";

/// Completion token cap for the key test.
pub const KEY_TEST_MAX_TOKENS: u32 = 5;

/// Checks API keys offline and against the live endpoint.
pub struct CredentialService {
    chat: Arc<ChatService>,
    config: Arc<StoryConfig>,
    metrics: Arc<dyn MetricsCollector>,
}

impl CredentialService {
    /// Creates a new credential service.
    pub fn new(
        chat: Arc<ChatService>,
        config: Arc<StoryConfig>,
        metrics: Arc<dyn MetricsCollector>,
    ) -> Self {
        Self {
            chat,
            config,
            metrics,
        }
    }

    /// Checks a key's format without touching the network.
    pub fn validate(&self, raw: &str) -> KeyValidation {
        validate_api_key(raw)
    }

    /// Sends a minimal completion to find out whether the key works.
    ///
    /// Every failure is folded into a [`KeyTestOutcome`]; this never errors.
    #[instrument(skip(self, credential), fields(key = %credential.key_hint()))]
    pub async fn test(&self, credential: &Credential) -> KeyTestOutcome {
        let request = ChatRequest::single_user(
            self.config.model.clone(),
            KEY_TEST_PROMPT,
            KEY_TEST_MAX_TOKENS,
            0.0,
        );

        let outcome = match self
            .chat
            .create(credential, &request, Some(self.config.key_test_timeout))
            .await
        {
            Ok(_) => KeyTestOutcome::Success,
            Err(error) => {
                tracing::info!(error = %redact(&error.to_string()), "API key test failed");
                KeyTestOutcome::from(&error)
            }
        };

        self.metrics.record_key_test(outcome.is_success());
        outcome
    }
}

impl std::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialService")
            .field("model", &self.config.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{fixtures, MockTransport};
    use crate::observability::DefaultMetricsCollector;
    use crate::transport::TransportError;
    use std::time::Duration;

    fn service(transport: &Arc<MockTransport>) -> (CredentialService, Arc<DefaultMetricsCollector>) {
        let config = Arc::new(StoryConfig::default());
        let chat = Arc::new(ChatService::new(transport.clone(), Arc::clone(&config)));
        let metrics = Arc::new(DefaultMetricsCollector::new());
        (
            CredentialService::new(chat, config, metrics.clone()),
            metrics,
        )
    }

    fn key() -> Credential {
        Credential::new("sk-test_key_1234567890")
    }

    #[tokio::test]
    async fn test_success_sends_minimal_request() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::chat_response("test"));
        let (service, metrics) = service(&transport);

        assert_eq!(service.test(&key()).await, KeyTestOutcome::Success);

        let recorded = transport.last_request().unwrap();
        assert_eq!(recorded.timeout, Some(Duration::from_secs(15)));
        let body: serde_json::Value = serde_json::from_slice(&recorded.body.unwrap()).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 5);
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["messages"][0]["content"], KEY_TEST_PROMPT);
        assert_eq!(metrics.get_metrics().key_tests_passed, 1);
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (401, KeyTestOutcome::InvalidKey),
            (429, KeyTestOutcome::RateLimited),
            (403, KeyTestOutcome::InsufficientPermissions),
            (
                500,
                KeyTestOutcome::ApiError("HTTP 500: Internal Server Error".to_string()),
            ),
        ];

        for (status, expected) in cases {
            let transport = Arc::new(MockTransport::new());
            transport.queue_error(status, "upstream exploded");
            let (service, _) = service(&transport);

            assert_eq!(service.test(&key()).await, expected, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_transport_failures() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_transport_error(TransportError::Dns {
            message: "dns error".to_string(),
        });
        transport.queue_transport_error(TransportError::Timeout {
            timeout: Duration::from_secs(15),
        });
        transport.queue_transport_error(TransportError::Connection {
            message: "connection refused".to_string(),
        });
        let (service, metrics) = service(&transport);

        assert_eq!(service.test(&key()).await, KeyTestOutcome::NoInternet);
        assert_eq!(service.test(&key()).await, KeyTestOutcome::Timeout);
        assert_eq!(
            service.test(&key()).await,
            KeyTestOutcome::ApiError("Network error: connection refused".to_string())
        );
        assert_eq!(metrics.get_metrics().key_tests_failed, 3);
    }

    #[test]
    fn test_validate_delegates_to_format_check() {
        let transport = Arc::new(MockTransport::new());
        let (service, _) = service(&transport);

        assert_eq!(service.validate("sk-short"), KeyValidation::TooShort);
        assert_eq!(transport.request_count(), 0);
    }
}
