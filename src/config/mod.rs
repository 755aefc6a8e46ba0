//! Configuration for the story client.
//!
//! Holds the endpoint, model and generation parameters. The API key is not
//! part of the configuration; callers pass a [`Credential`](crate::auth::Credential)
//! to each networked operation instead.

use std::time::Duration;
use url::Url;

use crate::errors::{StoryError, StoryResult};

/// Default base URL for the chat-completion API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model used for stories and key tests.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout for story generation (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the lightweight key test (15 seconds).
pub const DEFAULT_KEY_TEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default completion token cap for stories.
pub const DEFAULT_MAX_TOKENS: u32 = 600;

/// Default sampling temperature for stories.
pub const DEFAULT_TEMPERATURE: f32 = 0.8;

/// Configuration for the story client.
#[derive(Debug, Clone)]
pub struct StoryConfig {
    /// Base URL for API requests.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout for story generation.
    pub timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Request timeout for key tests.
    pub key_test_timeout: Duration,
    /// Completion token cap for stories.
    pub max_tokens: u32,
    /// Sampling temperature for stories.
    pub temperature: f32,
    /// Custom headers to include in requests.
    pub custom_headers: Vec<(String, String)>,
}

impl StoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> StoryConfigBuilder {
        StoryConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DREAMWEAVER_BASE_URL` (optional): Custom base URL
    /// - `DREAMWEAVER_MODEL` (optional): Model identifier
    /// - `DREAMWEAVER_TIMEOUT` (optional): Generation timeout in seconds
    pub fn from_env() -> StoryResult<Self> {
        let mut builder = StoryConfigBuilder::new();

        if let Ok(base_url) = std::env::var("DREAMWEAVER_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(model) = std::env::var("DREAMWEAVER_MODEL") {
            builder = builder.model(model);
        }

        if let Ok(timeout_str) = std::env::var("DREAMWEAVER_TIMEOUT") {
            match timeout_str.parse::<u64>() {
                Ok(secs) => builder = builder.timeout_secs(secs),
                Err(_) => tracing::warn!(value = %timeout_str, "Ignoring unparseable DREAMWEAVER_TIMEOUT"),
            }
        }

        builder.build()
    }
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            key_test_timeout: DEFAULT_KEY_TEST_TIMEOUT,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            custom_headers: Vec::new(),
        }
    }
}

/// Builder for `StoryConfig`.
#[derive(Debug, Default)]
pub struct StoryConfigBuilder {
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    key_test_timeout: Option<Duration>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    custom_headers: Vec<(String, String)>,
}

impl StoryConfigBuilder {
    /// Creates a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the generation timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the generation timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the key test timeout.
    pub fn key_test_timeout(mut self, timeout: Duration) -> Self {
        self.key_test_timeout = Some(timeout);
        self
    }

    /// Sets the completion token cap for stories.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the sampling temperature for stories.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Adds a custom header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> StoryResult<StoryConfig> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let parsed = Url::parse(&base_url)?;
        let loopback = matches!(
            parsed.host_str(),
            Some("localhost" | "127.0.0.1" | "[::1]")
        );
        if parsed.scheme() != "https" && !(parsed.scheme() == "http" && loopback) {
            return Err(StoryError::configuration("Base URL must use HTTPS"));
        }

        let model = self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        if model.trim().is_empty() {
            return Err(StoryError::configuration("Model cannot be empty"));
        }

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=2.0).contains(&temperature) {
            return Err(StoryError::configuration(
                "Temperature must be between 0.0 and 2.0",
            ));
        }

        let max_tokens = self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        if max_tokens == 0 {
            return Err(StoryError::configuration("max_tokens must be positive"));
        }

        Ok(StoryConfig {
            base_url,
            model,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            key_test_timeout: self.key_test_timeout.unwrap_or(DEFAULT_KEY_TEST_TIMEOUT),
            max_tokens,
            temperature,
            custom_headers: self.custom_headers,
        })
    }
}
