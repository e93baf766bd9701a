//! # Newsroom Infrastructure
//!
//! Concrete implementations of the ports defined in `newsroom-core`:
//! the post store (PostgreSQL via SeaORM, or in-memory) and the
//! content-moderation client.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL store via SeaORM
//! - `minimal` - No external database, in-memory store only

pub mod database;
pub mod moderation;

pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use moderation::{ModerationConfig, OpenAiModerationClient};

#[cfg(feature = "postgres")]
pub use database::PostgresPostRepository;
