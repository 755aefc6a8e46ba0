//! Dreamweaver Story Client
//!
//! Generates short personalized children's stories through an
//! OpenAI-compatible chat-completion endpoint, with four built-in template
//! stories used whenever the remote model cannot be reached or refuses the
//! request.
//!
//! # Features
//!
//! - **Never fails on the happy path**: every remote failure becomes a
//!   template story plus a user-facing warning
//! - **Key checks**: offline format validation and a minimal live key test
//! - **Story modes**: playful, bath time, bedtime and holiday
//! - **Observability**: tracing spans, secret redaction, generation metrics
//! - **Async/Await**: built on Tokio; dropping a call cancels it
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use dreamweaver_client::{Credential, DreamweaverClient, StoryMode, StoryRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DreamweaverClient::builder().build()?;
//!     let credential = Credential::new("sk-your_api_key_here");
//!
//!     let request = StoryRequest::with_mode("Mia", "Mario, Luigi", StoryMode::Holiday)
//!         .holiday("Halloween");
//!     let result = client.generate(&credential, &request).await;
//!
//!     println!("{}", result.story().unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! # Offline Templates
//!
//! ```rust
//! use dreamweaver_client::{generate_template, StoryMode};
//!
//! let story = generate_template(Some(StoryMode::Bedtime), "Mia", "Luna", None);
//! assert!(story.starts_with("As the first stars began to twinkle"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod story;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use auth::{validate_api_key, Credential, KeyValidation};
pub use client::{DreamweaverClient, DreamweaverClientBuilder};
pub use config::StoryConfig;
pub use errors::{StoryError, StoryResult};
pub use story::{build_prompt, generate_template};

// Type re-exports
pub use types::chat::{ChatRequest, ChatResponse, Message, Role, Usage};
pub use types::story::{
    FallbackReason, GenerationResult, KeyTestOutcome, StoryMode, StoryRequest,
};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
