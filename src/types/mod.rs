//! Type definitions.
//!
//! `chat` holds the chat-completion wire format; `story` holds the values
//! exchanged with the application shell.

pub mod chat;
pub mod story;
