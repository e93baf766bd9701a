//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod moderation;
mod repository;

pub use moderation::{ContentModerator, ModerationError};
pub use repository::PostRepository;
