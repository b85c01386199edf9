//! User service configuration.

use std::str::FromStr;

use common::{env_or, env_parse_or, env_secret_or, DatabaseConfig};

/// Development API key used when `USER_SERVICE_API_KEY` is unset
const DEV_API_KEY: &str = "ali";

/// Where user records live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

/// User service configuration.
#[derive(Clone)]
pub struct UserServiceConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Value expected in the `X-API-KEY` header
    pub api_key: String,
    pub storage: StorageBackend,
    pub database: DatabaseConfig,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let storage = match std::env::var("USER_SERVICE_STORAGE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to postgres", e);
                StorageBackend::Postgres
            }),
            Err(_) => StorageBackend::default(),
        };

        Self {
            host: env_or("USER_SERVICE_HOST", "0.0.0.0"),
            port: env_parse_or("USER_SERVICE_PORT", 8081),
            api_key: env_secret_or("USER_SERVICE_API_KEY", DEV_API_KEY),
            storage,
            database: DatabaseConfig::from_env(),
        }
    }
}

impl std::fmt::Debug for UserServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"[REDACTED]")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            api_key: DEV_API_KEY.to_string(),
            storage: StorageBackend::default(),
            database: DatabaseConfig::default(),
        }
    }
}
