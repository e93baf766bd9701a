//! Application state - shared across all handlers.

use std::sync::Arc;

use newsroom_core::PostService;
use newsroom_core::ports::{ContentModerator, ModerationError, PostRepository};
use newsroom_infra::{InMemoryPostRepository, OpenAiModerationClient};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use newsroom_infra::PostgresPostRepository;
#[cfg(feature = "postgres")]
use newsroom_infra::database::connect;

/// Startup failures.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("failed to connect to database: {0}")]
    Database(String),

    #[error("failed to run migrations: {0}")]
    Migration(String),

    #[error("failed to build moderation client: {0}")]
    Moderation(#[from] ModerationError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub moderator: Option<Arc<dyn ContentModerator>>,
    /// Which store backs the service, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, BootstrapError> {
        let (repo, storage) = Self::post_repository(config).await?;

        let moderator: Option<Arc<dyn ContentModerator>> = match &config.moderation {
            Some(moderation) => Some(Arc::new(OpenAiModerationClient::new(moderation.clone())?)),
            None => {
                tracing::info!("OPENAI_API_KEY not set. Moderation checks are disabled.");
                None
            }
        };

        tracing::info!(storage, "Application state initialized");

        Ok(Self {
            posts: PostService::new(repo).with_empty_list_policy(config.empty_list),
            moderator,
            storage,
        })
    }

    /// Wire an existing repository, without touching configuration.
    #[cfg(test)]
    pub fn with_repository(repo: Arc<dyn PostRepository>, storage: &'static str) -> Self {
        Self {
            posts: PostService::new(repo),
            moderator: None,
            storage,
        }
    }

    #[cfg(feature = "postgres")]
    async fn post_repository(
        config: &AppConfig,
    ) -> Result<(Arc<dyn PostRepository>, &'static str), BootstrapError> {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok((Arc::new(InMemoryPostRepository::new()), "memory"));
        };

        let conn = connect(db_config)
            .await
            .map_err(|e| BootstrapError::Database(e.to_string()))?;

        if config.run_migrations {
            let pending = Migrator::get_pending_migrations(&conn)
                .await
                .map_err(|e| BootstrapError::Migration(e.to_string()))?;

            if pending.is_empty() {
                tracing::info!("Database already migrated to latest version");
            } else {
                Migrator::up(&conn, None)
                    .await
                    .map_err(|e| BootstrapError::Migration(e.to_string()))?;
                tracing::info!(applied = pending.len(), "Database migrated successfully");
            }
        }

        Ok((Arc::new(PostgresPostRepository::new(conn)), "postgres"))
    }

    #[cfg(not(feature = "postgres"))]
    async fn post_repository(
        _config: &AppConfig,
    ) -> Result<(Arc<dyn PostRepository>, &'static str), BootstrapError> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok((Arc::new(InMemoryPostRepository::new()), "memory"))
    }
}
