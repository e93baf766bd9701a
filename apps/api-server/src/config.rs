//! Application configuration loaded from environment variables.

use std::env;

use newsroom_core::EmptyListPolicy;
use newsroom_infra::{DatabaseConfig, ModerationConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    pub empty_list: EmptyListPolicy,
    pub moderation: Option<ModerationConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = lookup("DATABASE_URL").map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = lookup("DB_MAX_CONNECTIONS").and_then(|s| s.parse().ok()) {
                config.max_connections = max;
            }
            if let Some(min) = lookup("DB_MIN_CONNECTIONS").and_then(|s| s.parse().ok()) {
                config.min_connections = min;
            }
            config
        });

        let moderation = lookup("OPENAI_API_KEY")
            .filter(|key| !key.is_empty())
            .map(|key| {
                let config = ModerationConfig::new(key);
                match lookup("MODERATION_ENDPOINT") {
                    Some(endpoint) => config.with_endpoint(endpoint),
                    None => config,
                }
            });

        let empty_list = if flag(lookup("EMPTY_LIST_NOT_FOUND"), false) {
            EmptyListPolicy::NotFound
        } else {
            EmptyListPolicy::Ok
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            run_migrations: flag(lookup("RUN_MIGRATIONS"), true),
            empty_list,
            moderation,
        }
    }
}

fn flag(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}
