//! Task service configuration.

use common::{env_or, env_parse_or, env_secret_or};

/// Development API key used when `TASK_SERVICE_API_KEY` is unset
const DEV_API_KEY: &str = "secret12345";

/// Task service configuration.
#[derive(Clone)]
pub struct TaskServiceConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Value expected in the `X-API-KEY` header
    pub api_key: String,
}

impl TaskServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env_or("TASK_SERVICE_HOST", "0.0.0.0"),
            port: env_parse_or("TASK_SERVICE_PORT", 8080),
            api_key: env_secret_or("TASK_SERVICE_API_KEY", DEV_API_KEY),
        }
    }
}

impl std::fmt::Debug for TaskServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskServiceConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl Default for TaskServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_key: DEV_API_KEY.to_string(),
        }
    }
}
