//! Pure story text builders.
//!
//! Nothing here performs I/O: prompts for the remote model, offline
//! template stories, and the display strings the shell shows around them.

pub mod catalog;
pub mod names;
pub mod prompt;
pub mod template;

pub use catalog::{find_franchise, Franchise, FRANCHISES};
pub use names::{join_child_names, parse_characters, story_title, summarize_characters};
pub use prompt::build_prompt;
pub use template::generate_template;
