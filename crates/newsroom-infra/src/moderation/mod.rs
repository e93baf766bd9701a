//! Content-moderation clients.

mod openai;

pub use openai::{DEFAULT_MODERATION_ENDPOINT, ModerationConfig, OpenAiModerationClient};
