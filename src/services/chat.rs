//! Chat completions service.

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::auth::Credential;
use crate::config::StoryConfig;
use crate::errors::{ApiErrorResponse, StoryError, StoryResult};
use crate::observability::redact;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::chat::{ChatRequest, ChatResponse};

/// Chat completions service.
///
/// Sends exactly one request per call. Failures are classified into
/// [`StoryError`] and returned; nothing is retried.
pub struct ChatService {
    transport: Arc<dyn HttpTransport>,
    config: Arc<StoryConfig>,
}

impl ChatService {
    /// Creates a new chat service.
    pub fn new(transport: Arc<dyn HttpTransport>, config: Arc<StoryConfig>) -> Self {
        Self { transport, config }
    }

    /// Creates a chat completion.
    ///
    /// `timeout` overrides the transport's default request timeout.
    #[instrument(skip(self, credential, request), fields(model = %request.model, key = %credential.key_hint()))]
    pub async fn create(
        &self,
        credential: &Credential,
        request: &ChatRequest,
        timeout: Option<Duration>,
    ) -> StoryResult<ChatResponse> {
        request.validate()?;

        let mut http_request = self.build_request(credential, request)?;
        if let Some(timeout) = timeout {
            http_request = http_request.with_timeout(timeout);
        }

        tracing::debug!(max_tokens = request.max_tokens, "Sending chat completion");

        let response = self.transport.send(http_request).await?;
        self.parse_response(response)
    }

    /// Builds an HTTP request from a chat request.
    fn build_request(
        &self,
        credential: &Credential,
        request: &ChatRequest,
    ) -> StoryResult<HttpRequest> {
        let mut http_request = HttpRequest::post("chat/completions")
            .with_body(serde_json::to_vec(request)?)
            .with_header("Content-Type", "application/json");
        for (name, value) in &self.config.custom_headers {
            http_request = http_request.with_header(name.clone(), value.clone());
        }

        credential.apply_auth(&mut http_request.headers);
        Ok(http_request)
    }

    /// Parses the HTTP response.
    fn parse_response(&self, response: HttpResponse) -> StoryResult<ChatResponse> {
        if !response.is_success() {
            let error = StoryError::from_status(
                response.status,
                ApiErrorResponse::message_from_body(&response.body),
                &response.headers,
            );
            tracing::debug!(
                status = response.status,
                error = %redact(error.message()),
                detail = ?error.detail().map(redact),
                "Chat completion rejected"
            );
            return Err(error);
        }

        serde_json::from_slice(&response.body).map_err(|e| StoryError::Serialization {
            message: format!("Failed to parse response: {}", e),
        })
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
