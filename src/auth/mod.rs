//! API credential handling.
//!
//! A [`Credential`] wraps the caller-supplied API key in a
//! [`SecretString`] so it never leaks through `Debug` output or logs.
//! [`validate_api_key`] is the offline format check the shell runs on
//! every keystroke.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix every OpenAI secret key starts with.
pub const KEY_PREFIX: &str = "sk-";

/// Minimum length of a plausible key, prefix included.
pub const MIN_KEY_LENGTH: usize = 20;

/// Environment variable read by [`Credential::from_default_env`].
pub const DEFAULT_KEY_ENV: &str = "OPENAI_API_KEY";

/// Result of checking an API key's format.
///
/// Exactly one outcome holds for a given input. The checks run in the
/// order the variants are declared and the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyValidation {
    /// The key is blank.
    Empty,
    /// The key does not start with `sk-`.
    InvalidFormat,
    /// The key is shorter than [`MIN_KEY_LENGTH`].
    TooShort,
    /// The key contains whitespace.
    ContainsSpaces,
    /// The key looks usable.
    Valid,
}

impl KeyValidation {
    /// Returns true for [`KeyValidation::Valid`].
    pub fn is_valid(self) -> bool {
        self == KeyValidation::Valid
    }

    /// Short human-readable description for inline form feedback.
    pub fn description(self) -> &'static str {
        match self {
            KeyValidation::Empty => "API key is required",
            KeyValidation::InvalidFormat => "API key should start with 'sk-'",
            KeyValidation::TooShort => "API key is too short",
            KeyValidation::ContainsSpaces => "API key cannot contain spaces",
            KeyValidation::Valid => "API key format is valid",
        }
    }
}

/// Checks the format of an API key without touching the network.
pub fn validate_api_key(raw: &str) -> KeyValidation {
    let key = raw.trim();

    if key.is_empty() {
        KeyValidation::Empty
    } else if !key.starts_with(KEY_PREFIX) {
        KeyValidation::InvalidFormat
    } else if key.chars().count() < MIN_KEY_LENGTH {
        KeyValidation::TooShort
    } else if key.chars().any(char::is_whitespace) {
        KeyValidation::ContainsSpaces
    } else {
        KeyValidation::Valid
    }
}

/// An API key supplied by the application shell.
///
/// The key is trimmed on construction. A blank credential is legal and
/// selects the template-only path in story generation.
#[derive(Clone)]
pub struct Credential {
    api_key: SecretString,
}

impl Credential {
    /// Creates a credential from a raw key, trimming surrounding whitespace.
    pub fn new(api_key: impl AsRef<str>) -> Self {
        Self {
            api_key: SecretString::new(api_key.as_ref().trim().to_string()),
        }
    }

    /// Creates a blank credential.
    pub fn none() -> Self {
        Self::new("")
    }

    /// Reads a credential from an environment variable, blank when unset.
    pub fn from_env(var_name: &str) -> Self {
        std::env::var(var_name).map(Self::new).unwrap_or_else(|_| Self::none())
    }

    /// Reads a credential from `OPENAI_API_KEY`.
    pub fn from_default_env() -> Self {
        Self::from_env(DEFAULT_KEY_ENV)
    }

    /// Returns true if no key was supplied.
    pub fn is_blank(&self) -> bool {
        self.api_key.expose_secret().is_empty()
    }

    /// Checks this credential's format.
    pub fn validation(&self) -> KeyValidation {
        validate_api_key(self.api_key.expose_secret())
    }

    /// Gets a hint of the API key for debugging (last 4 characters).
    pub fn key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        let count = key.chars().count();
        if count > 4 {
            let tail: String = key.chars().skip(count - 4).collect();
            format!("...{}", tail)
        } else {
            "****".to_string()
        }
    }

    /// Adds the bearer `Authorization` header.
    pub fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );
    }
}

impl Default for Credential {
    fn default() -> Self {
        Self::none()
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}
