//! Story domain types: modes, requests, and the values handed back to the shell.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StoryError;

/// Category of story requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryMode {
    /// Energetic daytime adventure.
    Playful,
    /// Water and bubbles.
    BathTime,
    /// Calm wind-down story.
    Bedtime,
    /// Festive story, optionally for a named holiday.
    Holiday,
}

impl StoryMode {
    /// All modes in picker order.
    pub const ALL: [StoryMode; 4] = [
        StoryMode::Playful,
        StoryMode::BathTime,
        StoryMode::Bedtime,
        StoryMode::Holiday,
    ];

    /// Parses a mode name case-insensitively.
    ///
    /// Accepts `"playful"`, `"bath time"`, `"bedtime"` and `"holiday"`.
    /// Anything else, including the picker identifier `"bathtime"`, is
    /// `None`; use [`StoryMode::from_id`] for picker identifiers.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "playful" => Some(StoryMode::Playful),
            "bath time" => Some(StoryMode::BathTime),
            "bedtime" => Some(StoryMode::Bedtime),
            "holiday" => Some(StoryMode::Holiday),
            _ => None,
        }
    }

    /// Looks up a mode by its picker identifier, exactly as [`StoryMode::id`]
    /// returns it.
    pub fn from_id(id: &str) -> Option<Self> {
        StoryMode::ALL.into_iter().find(|mode| mode.id() == id)
    }

    /// Stable identifier used by the mode picker.
    pub fn id(self) -> &'static str {
        match self {
            StoryMode::Playful => "playful",
            StoryMode::BathTime => "bathtime",
            StoryMode::Bedtime => "bedtime",
            StoryMode::Holiday => "holiday",
        }
    }

    /// Name shown to users.
    pub fn display_name(self) -> &'static str {
        match self {
            StoryMode::Playful => "Playful",
            StoryMode::BathTime => "Bath Time",
            StoryMode::Bedtime => "Bedtime",
            StoryMode::Holiday => "Holiday",
        }
    }
}

impl fmt::Display for StoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for StoryMode {
    type Err = StoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoryMode::parse(s).ok_or_else(|| {
            StoryError::validation_param(format!("Unknown story mode '{}'", s), "mode")
        })
    }
}

/// Inputs for one story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryRequest {
    /// Child names, already joined for display (e.g. `"Mia and Leo"`).
    pub child_names: String,
    /// Character names, already joined for display.
    pub characters: String,
    /// Story mode; `None` when the shell sent an unrecognized mode.
    pub mode: Option<StoryMode>,
    /// Holiday name for [`StoryMode::Holiday`].
    pub holiday: Option<String>,
}

impl StoryRequest {
    /// Creates a request, parsing the mode name.
    pub fn new(
        child_names: impl Into<String>,
        characters: impl Into<String>,
        mode: &str,
    ) -> Self {
        Self {
            child_names: child_names.into(),
            characters: characters.into(),
            mode: StoryMode::parse(mode),
            holiday: None,
        }
    }

    /// Creates a request for a known mode.
    pub fn with_mode(
        child_names: impl Into<String>,
        characters: impl Into<String>,
        mode: StoryMode,
    ) -> Self {
        Self {
            child_names: child_names.into(),
            characters: characters.into(),
            mode: Some(mode),
            holiday: None,
        }
    }

    /// Sets the holiday name.
    pub fn holiday(mut self, holiday: impl Into<String>) -> Self {
        self.holiday = Some(holiday.into());
        self
    }

    /// Holiday name if one was supplied and is not blank.
    pub fn holiday_name(&self) -> Option<&str> {
        self.holiday.as_deref().map(str::trim).filter(|h| !h.is_empty())
    }

    /// Validates the request before any story is produced.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.child_names.trim().is_empty() {
            return Err(StoryError::validation_param(
                "At least one child name is required",
                "child_names",
            ));
        }

        if self.characters.trim().is_empty() {
            return Err(StoryError::validation_param(
                "At least one character is required",
                "characters",
            ));
        }

        Ok(())
    }
}

/// Outcome of a story generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    /// A story was produced.
    Success {
        /// Story text.
        story: String,
        /// True only when the text came from the remote API.
        is_ai_generated: bool,
        /// Why a template was used instead of the API, if it was.
        warning: Option<String>,
    },
    /// The request was rejected before any story was produced.
    Error {
        /// Reason for the rejection.
        message: String,
    },
}

impl GenerationResult {
    /// An AI-written story.
    pub fn ai(story: impl Into<String>) -> Self {
        GenerationResult::Success {
            story: story.into(),
            is_ai_generated: true,
            warning: None,
        }
    }

    /// A template story with no warning.
    pub fn template(story: impl Into<String>) -> Self {
        GenerationResult::Success {
            story: story.into(),
            is_ai_generated: false,
            warning: None,
        }
    }

    /// A template story substituted for a failed AI request.
    pub fn fallback(story: impl Into<String>, reason: FallbackReason) -> Self {
        GenerationResult::Success {
            story: story.into(),
            is_ai_generated: false,
            warning: Some(reason.warning().to_string()),
        }
    }

    /// Story text, if one was produced.
    pub fn story(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { story, .. } => Some(story),
            GenerationResult::Error { .. } => None,
        }
    }

    /// Fallback warning, if any.
    pub fn warning(&self) -> Option<&str> {
        match self {
            GenerationResult::Success { warning, .. } => warning.as_deref(),
            GenerationResult::Error { .. } => None,
        }
    }

    /// True only for AI-written stories.
    pub fn is_ai_generated(&self) -> bool {
        matches!(
            self,
            GenerationResult::Success {
                is_ai_generated: true,
                ..
            }
        )
    }

    /// True for [`GenerationResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }
}

/// Why a template story replaced an AI story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The held key failed the offline format check.
    InvalidKeyFormat,
    /// The API answered without usable text.
    EmptyResponse,
    /// HTTP 401.
    InvalidKey,
    /// HTTP 429.
    RateLimited,
    /// HTTP 403.
    AccessDenied,
    /// Any other HTTP error status.
    ApiError,
    /// Host name resolution failed.
    NoInternet,
    /// The request timed out.
    Timeout,
    /// Anything else.
    Unexpected,
}

impl FallbackReason {
    /// All reasons, for metrics enumeration.
    pub const ALL: [FallbackReason; 9] = [
        FallbackReason::InvalidKeyFormat,
        FallbackReason::EmptyResponse,
        FallbackReason::InvalidKey,
        FallbackReason::RateLimited,
        FallbackReason::AccessDenied,
        FallbackReason::ApiError,
        FallbackReason::NoInternet,
        FallbackReason::Timeout,
        FallbackReason::Unexpected,
    ];

    /// Warning shown to the user alongside the template story.
    pub fn warning(self) -> &'static str {
        match self {
            FallbackReason::InvalidKeyFormat => {
                "Invalid API key format. Used template story instead."
            }
            FallbackReason::EmptyResponse => {
                "AI returned empty response. Used template story instead."
            }
            FallbackReason::InvalidKey => "Invalid API key. Used template story instead.",
            FallbackReason::RateLimited => "Rate limit exceeded. Used template story instead.",
            FallbackReason::AccessDenied => "API access denied. Used template story instead.",
            FallbackReason::ApiError => "API error. Used template story instead.",
            FallbackReason::NoInternet => "No internet connection. Used template story instead.",
            FallbackReason::Timeout => "Request timeout. Used template story instead.",
            FallbackReason::Unexpected => "Unexpected error. Used template story instead.",
        }
    }

    /// Short label for logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackReason::InvalidKeyFormat => "invalid_key_format",
            FallbackReason::EmptyResponse => "empty_response",
            FallbackReason::InvalidKey => "invalid_key",
            FallbackReason::RateLimited => "rate_limited",
            FallbackReason::AccessDenied => "access_denied",
            FallbackReason::ApiError => "api_error",
            FallbackReason::NoInternet => "no_internet",
            FallbackReason::Timeout => "timeout",
            FallbackReason::Unexpected => "unexpected",
        }
    }
}

impl From<&StoryError> for FallbackReason {
    fn from(error: &StoryError) -> Self {
        match error {
            StoryError::Authentication { .. } => FallbackReason::InvalidKey,
            StoryError::RateLimit { .. } => FallbackReason::RateLimited,
            StoryError::Authorization { .. } => FallbackReason::AccessDenied,
            StoryError::Api { .. } => FallbackReason::ApiError,
            StoryError::NoInternet { .. } => FallbackReason::NoInternet,
            StoryError::Timeout { .. } => FallbackReason::Timeout,
            _ => FallbackReason::Unexpected,
        }
    }
}

/// Outcome of a live key test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "message", rename_all = "snake_case")]
pub enum KeyTestOutcome {
    /// The key works.
    Success,
    /// HTTP 401.
    InvalidKey,
    /// HTTP 429.
    RateLimited,
    /// HTTP 403.
    InsufficientPermissions,
    /// Host name resolution failed.
    NoInternet,
    /// The request timed out.
    Timeout,
    /// Any other failure, with a display message.
    ApiError(String),
}

impl KeyTestOutcome {
    /// True for [`KeyTestOutcome::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, KeyTestOutcome::Success)
    }
}

impl From<&StoryError> for KeyTestOutcome {
    fn from(error: &StoryError) -> Self {
        match error {
            StoryError::Authentication { .. } => KeyTestOutcome::InvalidKey,
            StoryError::RateLimit { .. } => KeyTestOutcome::RateLimited,
            StoryError::Authorization { .. } => KeyTestOutcome::InsufficientPermissions,
            StoryError::Api {
                status_code,
                message,
                ..
            } => KeyTestOutcome::ApiError(format!("HTTP {}: {}", status_code, message)),
            StoryError::NoInternet { .. } => KeyTestOutcome::NoInternet,
            StoryError::Timeout { .. } => KeyTestOutcome::Timeout,
            other => KeyTestOutcome::ApiError(format!("Network error: {}", other.message())),
        }
    }
}
