//! Story client.
//!
//! Wires configuration, transport, services and metrics together.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{Credential, KeyValidation};
use crate::config::{StoryConfig, StoryConfigBuilder};
use crate::errors::{StoryError, StoryResult};
use crate::observability::{DefaultMetricsCollector, MetricsCollector};
use crate::services::{ChatService, CredentialService, StoryService};
use crate::transport::{HttpTransport, HttpTransportImpl};
use crate::types::story::{GenerationResult, KeyTestOutcome, StoryRequest};

/// The main story client.
///
/// # Example
///
/// ```rust,no_run
/// use dreamweaver_client::{Credential, DreamweaverClient, StoryRequest};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = DreamweaverClient::builder().build()?;
///     let credential = Credential::from_default_env();
///
///     let request = StoryRequest::new("Mia, Leo", "Luna the owl", "bedtime");
///     let result = client.generate(&credential, &request).await;
///
///     if let Some(warning) = result.warning() {
///         eprintln!("{}", warning);
///     }
///     println!("{}", result.story().unwrap_or_default());
///     Ok(())
/// }
/// ```
pub struct DreamweaverClient {
    config: Arc<StoryConfig>,
    chat_service: Arc<ChatService>,
    credential_service: CredentialService,
    story_service: StoryService,
    metrics: Arc<dyn MetricsCollector>,
}

impl DreamweaverClient {
    /// Creates a new client builder.
    pub fn builder() -> DreamweaverClientBuilder {
        DreamweaverClientBuilder::new()
    }

    /// Creates a client from environment variables.
    ///
    /// See [`StoryConfig::from_env`]. The API key is not read here; use
    /// [`Credential::from_default_env`] for that.
    pub fn from_env() -> StoryResult<Self> {
        let config = StoryConfig::from_env()?;
        DreamweaverClientBuilder::from_config(config).build()
    }

    /// Generates a story, falling back to a template on any remote failure.
    pub async fn generate(
        &self,
        credential: &Credential,
        request: &StoryRequest,
    ) -> GenerationResult {
        self.story_service.generate(credential, request).await
    }

    /// Checks a key's format without touching the network.
    pub fn validate_api_key(&self, raw: &str) -> KeyValidation {
        self.credential_service.validate(raw)
    }

    /// Tests a key against the live endpoint.
    pub async fn test_api_key(&self, credential: &Credential) -> KeyTestOutcome {
        self.credential_service.test(credential).await
    }

    /// Returns the chat service.
    pub fn chat(&self) -> &ChatService {
        &self.chat_service
    }

    /// Returns the credential service.
    pub fn credentials(&self) -> &CredentialService {
        &self.credential_service
    }

    /// Returns the story service.
    pub fn stories(&self) -> &StoryService {
        &self.story_service
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Returns the metrics collector.
    pub fn metrics(&self) -> &dyn MetricsCollector {
        self.metrics.as_ref()
    }
}

impl std::fmt::Debug for DreamweaverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DreamweaverClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for the story client.
pub struct DreamweaverClientBuilder {
    config_builder: StoryConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
}

impl DreamweaverClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: StoryConfigBuilder::new(),
            transport: None,
            metrics: None,
        }
    }

    /// Creates a builder from an existing configuration.
    pub fn from_config(config: StoryConfig) -> Self {
        let mut config_builder = StoryConfigBuilder::new()
            .base_url(config.base_url)
            .model(config.model)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .key_test_timeout(config.key_test_timeout)
            .max_tokens(config.max_tokens)
            .temperature(config.temperature);
        for (name, value) in config.custom_headers {
            config_builder = config_builder.header(name, value);
        }

        Self {
            config_builder,
            transport: None,
            metrics: None,
        }
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.model(model);
        self
    }

    /// Sets the generation timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the generation timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config_builder = self.config_builder.timeout_secs(secs);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.connect_timeout(timeout);
        self
    }

    /// Sets the key test timeout.
    pub fn key_test_timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.key_test_timeout(timeout);
        self
    }

    /// Sets the completion token cap for stories.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config_builder = self.config_builder.max_tokens(max_tokens);
        self
    }

    /// Sets the sampling temperature for stories.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.config_builder = self.config_builder.temperature(temperature);
        self
    }

    /// Adds a custom header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.header(name, value);
        self
    }

    /// Sets a custom transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Builds the client.
    pub fn build(self) -> StoryResult<DreamweaverClient> {
        let config = Arc::new(self.config_builder.build()?);

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                HttpTransportImpl::new(&config.base_url, config.timeout, config.connect_timeout)
                    .map_err(|e| StoryError::Configuration {
                        message: e.to_string(),
                    })?,
            ),
        };

        let metrics: Arc<dyn MetricsCollector> = self
            .metrics
            .unwrap_or_else(|| Arc::new(DefaultMetricsCollector::new()));

        let chat_service = Arc::new(ChatService::new(transport, Arc::clone(&config)));
        let credential_service = CredentialService::new(
            Arc::clone(&chat_service),
            Arc::clone(&config),
            Arc::clone(&metrics),
        );
        let story_service = StoryService::new(
            Arc::clone(&chat_service),
            Arc::clone(&config),
            Arc::clone(&metrics),
        );

        tracing::debug!(base_url = %config.base_url, model = %config.model, "Story client built");

        Ok(DreamweaverClient {
            config,
            chat_service,
            credential_service,
            story_service,
            metrics,
        })
    }
}

impl Default for DreamweaverClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DreamweaverClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DreamweaverClientBuilder")
            .field("config_builder", &self.config_builder)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{fixtures, MockTransport};
    use crate::types::story::StoryMode;

    #[test]
    fn test_builder_defaults() {
        let client = DreamweaverClientBuilder::new().build().unwrap();

        assert_eq!(client.config().base_url, "https://api.openai.com/v1");
        assert_eq!(client.config().model, "gpt-4o-mini");
    }

    #[test]
    fn test_builder_rejects_insecure_base_url() {
        let result = DreamweaverClientBuilder::new()
            .base_url("http://api.example.com/v1")
            .build();

        assert!(matches!(result, Err(StoryError::Configuration { .. })));
    }

    #[test]
    fn test_from_config_keeps_settings() {
        let config = StoryConfig::builder()
            .model("gpt-4o")
            .max_tokens(300)
            .key_test_timeout(Duration::from_secs(5))
            .header("X-App", "bedtime")
            .build()
            .unwrap();

        let client = DreamweaverClientBuilder::from_config(config).build().unwrap();

        assert_eq!(client.config().model, "gpt-4o");
        assert_eq!(client.config().max_tokens, 300);
        assert_eq!(client.config().key_test_timeout, Duration::from_secs(5));
        assert_eq!(
            client.config().custom_headers,
            vec![("X-App".to_string(), "bedtime".to_string())]
        );
    }

    #[tokio::test]
    async fn test_client_shares_metrics_across_services() {
        let transport = Arc::new(MockTransport::new());
        transport.queue_json(&fixtures::chat_response("Once upon a time"));
        transport.queue_json(&fixtures::chat_response("test"));

        let client = DreamweaverClientBuilder::new()
            .transport(transport.clone())
            .build()
            .unwrap();
        let credential = Credential::new("sk-test_key_1234567890");

        let result = client
            .generate(
                &credential,
                &StoryRequest::with_mode("Mia", "Luna", StoryMode::Bedtime),
            )
            .await;
        assert!(result.is_ai_generated());

        assert_eq!(client.test_api_key(&credential).await, KeyTestOutcome::Success);

        let metrics = client.metrics().get_metrics();
        assert_eq!(metrics.ai_stories, 1);
        assert_eq!(metrics.key_tests_passed, 1);
        assert_eq!(transport.request_count(), 2);
    }

    #[test]
    fn test_generate_without_key_blocks_without_network() {
        let transport = Arc::new(MockTransport::new());
        let client = DreamweaverClientBuilder::new()
            .transport(transport.clone())
            .build()
            .unwrap();

        let request = StoryRequest::new("Mia", "Luna", "bath time");
        let result = tokio_test::block_on(client.generate(&Credential::none(), &request));

        assert_eq!(result.story(), Some(client.stories().template(&request).as_str()));
        assert_eq!(result.warning(), None);
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_validate_api_key() {
        let client = DreamweaverClientBuilder::new().build().unwrap();

        assert_eq!(client.validate_api_key(""), KeyValidation::Empty);
        assert_eq!(
            client.validate_api_key("sk-abcdefghijklmnopqrstu"),
            KeyValidation::Valid
        );
    }
}
