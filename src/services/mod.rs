//! Services for chat completions, key checks and story generation.

mod chat;
mod credentials;
mod story;

pub use chat::ChatService;
pub use credentials::{CredentialService, KEY_TEST_MAX_TOKENS, KEY_TEST_PROMPT};
pub use story::StoryService;
