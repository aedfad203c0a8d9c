//! Application settings loaded from environment variables.

use std::env;

use sea_orm::IsolationLevel;

use super::constants::{DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    /// Isolation level for service boundaries (`None` = backend default)
    pub transaction_isolation: Option<IsolationLevel>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("transaction_isolation", &self.transaction_isolation)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            transaction_isolation: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let transaction_isolation = env::var("TRANSACTION_ISOLATION").ok().and_then(|v| {
            let level = parse_isolation(&v);
            if level.is_none() {
                tracing::warn!(value = %v, "Unknown TRANSACTION_ISOLATION, using backend default");
            }
            level
        });

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            transaction_isolation,
        }
    }
}

/// Parse an isolation level name as written in the environment.
pub fn parse_isolation(value: &str) -> Option<IsolationLevel> {
    match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "read_uncommitted" => Some(IsolationLevel::ReadUncommitted),
        "read_committed" => Some(IsolationLevel::ReadCommitted),
        "repeatable_read" => Some(IsolationLevel::RepeatableRead),
        "serializable" => Some(IsolationLevel::Serializable),
        _ => None,
    }
}
