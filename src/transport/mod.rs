//! HTTP transport layer.
//!
//! The services talk to the chat-completion endpoint only through the
//! [`HttpTransport`] trait so tests can substitute a fake.

mod http;

pub use http::{
    classify_reqwest_error, HttpRequest, HttpResponse, HttpTransport, HttpTransportImpl,
};

use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Host name could not be resolved.
    #[error("DNS error: {message}")]
    Dns {
        /// Error message.
        message: String,
    },

    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}
