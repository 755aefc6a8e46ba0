//! Error types for the story client.
//!
//! Covers configuration problems, local request validation, classified
//! remote-service failures and transport failures. Classification of an
//! HTTP status into a variant is a pure function so it can be tested without
//! a live endpoint.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::transport::TransportError;

/// Result type alias for story client operations.
pub type StoryResult<T> = Result<T, StoryError>;

/// Error type for story client operations.
#[derive(Debug, Error)]
pub enum StoryError {
    /// Configuration error (invalid base URL, model, transport setup).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Local request validation failed.
    #[error("Validation error: {message}")]
    Validation {
        /// Error message describing the validation issue.
        message: String,
        /// The parameter that caused the error.
        param: Option<String>,
    },

    /// The remote service rejected the API key (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Error message from the API.
        message: String,
    },

    /// The API key lacks access to the requested resource (HTTP 403).
    #[error("Authorization failed: {message}")]
    Authorization {
        /// Error message from the API.
        message: String,
    },

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        /// Error message from the API.
        message: String,
        /// Duration the server asked us to wait, if any.
        retry_after: Option<Duration>,
    },

    /// Any other non-success HTTP status.
    #[error("API error (HTTP {status_code}): {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Status reason phrase, e.g. `Internal Server Error`.
        message: String,
        /// Error message from the response body, when it carried one.
        detail: Option<String>,
    },

    /// Host name resolution failed; the device is most likely offline.
    #[error("No internet connection: {message}")]
    NoInternet {
        /// Underlying resolver message.
        message: String,
    },

    /// Connect or read timeout.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Other network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl StoryError {
    /// Creates a validation error naming the offending parameter.
    pub fn validation_param(message: impl Into<String>, param: impl Into<String>) -> Self {
        StoryError::Validation {
            message: message.into(),
            param: Some(param.into()),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        StoryError::Configuration {
            message: message.into(),
        }
    }

    /// Classifies a non-success HTTP status.
    ///
    /// `detail` is the API's own error message when one could be parsed.
    /// 401, 403 and 429 carry it as their message, falling back to the
    /// reason phrase. Every other status uses the reason phrase as its
    /// message and keeps the body text in `detail`.
    pub fn from_status(
        status: u16,
        detail: Option<String>,
        headers: &HashMap<String, String>,
    ) -> Self {
        let message = detail
            .as_deref()
            .map_or_else(|| reason_phrase(status), str::to_string);

        match status {
            401 => StoryError::Authentication { message },
            403 => StoryError::Authorization { message },
            429 => StoryError::RateLimit {
                message,
                retry_after: headers
                    .get("retry-after")
                    .and_then(|s| s.trim().parse::<u64>().ok())
                    .map(Duration::from_secs),
            },
            _ => StoryError::Api {
                status_code: status,
                message: reason_phrase(status),
                detail,
            },
        }
    }

    /// Returns the HTTP status this error was classified from, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StoryError::Authentication { .. } => Some(401),
            StoryError::Authorization { .. } => Some(403),
            StoryError::RateLimit { .. } => Some(429),
            StoryError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Returns the retry-after duration if the server supplied one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            StoryError::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns the response-body message of an [`StoryError::Api`] error.
    pub fn detail(&self) -> Option<&str> {
        match self {
            StoryError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Returns the bare message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            StoryError::Configuration { message }
            | StoryError::Validation { message, .. }
            | StoryError::Authentication { message }
            | StoryError::Authorization { message }
            | StoryError::RateLimit { message, .. }
            | StoryError::Api { message, .. }
            | StoryError::NoInternet { message }
            | StoryError::Timeout { message }
            | StoryError::Network { message }
            | StoryError::Serialization { message } => message,
        }
    }
}

/// Canonical reason phrase for a status code, e.g. `Bad Gateway`.
fn reason_phrase(status: u16) -> String {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
        .to_string()
}

/// API error response body.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// The error details.
    pub error: ApiErrorDetail,
}

/// Detailed API error information.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// The error type.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// The error message.
    pub message: String,
    /// The parameter that caused the error.
    pub param: Option<String>,
    /// The error code.
    pub code: Option<String>,
}

impl ApiErrorResponse {
    /// Extracts the error message from a response body, if it is an API error document.
    pub fn message_from_body(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ApiErrorResponse>(body)
            .ok()
            .map(|e| e.error.message)
            .filter(|m| !m.trim().is_empty())
    }
}

impl From<TransportError> for StoryError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Dns { message } => StoryError::NoInternet { message },
            TransportError::Timeout { timeout } => StoryError::Timeout {
                message: format!("Timeout after {:?}", timeout),
            },
            TransportError::Connection { message } | TransportError::InvalidResponse { message } => {
                StoryError::Network { message }
            }
        }
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(err: serde_json::Error) -> Self {
        StoryError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for StoryError {
    fn from(err: url::ParseError) -> Self {
        StoryError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(401, "Authentication"; "unauthorized")]
    #[test_case(403, "Authorization"; "forbidden")]
    #[test_case(429, "RateLimit"; "too many requests")]
    #[test_case(400, "Api"; "bad request")]
    #[test_case(404, "Api"; "not found")]
    #[test_case(500, "Api"; "internal server error")]
    #[test_case(503, "Api"; "service unavailable")]
    fn test_from_status_classification(status: u16, expected: &str) {
        let error = StoryError::from_status(status, None, &HashMap::new());
        let actual = match error {
            StoryError::Authentication { .. } => "Authentication",
            StoryError::Authorization { .. } => "Authorization",
            StoryError::RateLimit { .. } => "RateLimit",
            StoryError::Api { .. } => "Api",
            _ => "other",
        };
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_from_status_uses_reason_phrase_without_body_message() {
        let error = StoryError::from_status(502, None, &HashMap::new());
        assert_eq!(error.message(), "Bad Gateway");
        assert_eq!(error.status_code(), Some(502));
    }

    #[test]
    fn test_from_status_keeps_body_text_out_of_api_message() {
        let error = StoryError::from_status(
            500,
            Some("The server had an error".to_string()),
            &HashMap::new(),
        );
        assert_eq!(error.message(), "Internal Server Error");
        assert_eq!(error.detail(), Some("The server had an error"));
        assert_eq!(
            error.to_string(),
            "API error (HTTP 500): Internal Server Error"
        );
    }

    #[test]
    fn test_from_status_uses_body_text_for_auth_errors() {
        let error = StoryError::from_status(
            401,
            Some("Incorrect API key provided".to_string()),
            &HashMap::new(),
        );
        assert_eq!(error.message(), "Incorrect API key provided");
        assert_eq!(error.detail(), None);
    }

    #[test]
    fn test_rate_limit_reads_retry_after_header() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), "20".to_string());

        let error = StoryError::from_status(429, None, &headers);
        assert_eq!(error.retry_after(), Some(Duration::from_secs(20)));
    }

    #[test]
    fn test_transport_error_conversion() {
        let dns: StoryError = TransportError::Dns {
            message: "failed to lookup address information".to_string(),
        }
        .into();
        assert!(matches!(dns, StoryError::NoInternet { .. }));

        let timeout: StoryError = TransportError::Timeout {
            timeout: Duration::from_secs(60),
        }
        .into();
        assert!(matches!(timeout, StoryError::Timeout { .. }));

        let refused: StoryError = TransportError::Connection {
            message: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(refused, StoryError::Network { .. }));
    }

    #[test]
    fn test_message_from_body() {
        let body = br#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(
            ApiErrorResponse::message_from_body(body),
            Some("Incorrect API key provided".to_string())
        );
        assert_eq!(ApiErrorResponse::message_from_body(b"<html>oops</html>"), None);
    }
}
