//! Chat completion wire types.

use serde::{Deserialize, Serialize};

use crate::errors::StoryError;

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model ID.
    pub model: String,

    /// Messages array.
    pub messages: Vec<Message>,

    /// Max completion tokens.
    pub max_tokens: u32,

    /// Temperature (0.0-2.0).
    pub temperature: f32,

    /// Streaming is never requested by this client.
    pub stream: bool,
}

impl ChatRequest {
    /// Creates a request carrying a single user message.
    pub fn single_user(
        model: impl Into<String>,
        content: impl Into<String>,
        max_tokens: u32,
        temperature: f32,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(content)],
            max_tokens,
            temperature,
            stream: false,
        }
    }

    /// Validates the request.
    pub fn validate(&self) -> Result<(), StoryError> {
        if self.model.is_empty() {
            return Err(StoryError::validation_param("Model is required", "model"));
        }

        if self.messages.is_empty() {
            return Err(StoryError::validation_param(
                "At least one message is required",
                "messages",
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(StoryError::validation_param(
                "Temperature must be between 0.0 and 2.0",
                "temperature",
            ));
        }

        if let Some(i) = self.messages.iter().position(|m| m.content.is_empty()) {
            return Err(StoryError::validation_param(
                format!("Message {}: content cannot be empty", i),
                format!("messages[{}]", i),
            ));
        }

        Ok(())
    }
}

/// Chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message.
    System,
    /// User message.
    User,
    /// Assistant message.
    Assistant,
}

/// Chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Response ID.
    #[serde(default)]
    pub id: String,

    /// Response choices.
    #[serde(default)]
    pub choices: Vec<Choice>,

    /// Token usage.
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatResponse {
    /// Gets the first choice content.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.content.as_deref())
    }

    /// Gets the first choice content, trimmed, if it is not blank.
    pub fn non_blank_content(&self) -> Option<&str> {
        self.content().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Gets the finish reason from the first choice.
    pub fn finish_reason(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.finish_reason.as_deref())
    }
}

/// A response choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Choice index.
    #[serde(default)]
    pub index: u32,
    /// The generated message.
    pub message: AssistantMessage,
    /// Why generation stopped (`stop`, `length`, ...).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantMessage {
    /// Message role.
    pub role: Role,
    /// Message text; absent for refusals or tool calls.
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Usage {
    /// Prompt tokens.
    pub prompt_tokens: u32,
    /// Completion tokens.
    pub completion_tokens: u32,
    /// Total tokens.
    pub total_tokens: u32,
}
