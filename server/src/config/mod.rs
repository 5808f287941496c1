// File: server/src/config/mod.rs
pub mod manager;
use serde::{Deserialize, Serialize};
pub use manager::ConfigManager;

use crate::backend::Collection;
use crate::constants::{defaults, routes};
use crate::errors::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Base URL of the storage-orchestration backend requests are forwarded to
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default = "default_backend_timeout")]
    pub backend_timeout_seconds: u64,
    /// Prefix of the operation status route
    #[serde(default = "default_queue_route")]
    pub queue_route: String,
    /// Reject new POST/DELETE requests while this many operations are running
    pub max_in_flight: Option<usize>,
    /// Shared secret expected as `Authorization: Bearer <key>`; unset disables auth
    pub api_key: Option<String>,
}

fn default_host() -> String {
    defaults::HOST.to_string()
}

fn default_port() -> u16 {
    defaults::PORT
}

fn default_backend_url() -> String {
    defaults::BACKEND_URL.to_string()
}

fn default_backend_timeout() -> u64 {
    defaults::BACKEND_TIMEOUT_SECONDS
}

fn default_queue_route() -> String {
    routes::DEFAULT_QUEUE_ROUTE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            backend_url: default_backend_url(),
            backend_timeout_seconds: default_backend_timeout(),
            queue_route: default_queue_route(),
            max_in_flight: None,
            api_key: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.queue_route.starts_with('/') || self.queue_route.trim_matches('/').is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "queue_route".to_string(),
                reason: format!("'{}' must be an absolute path below '/'", self.queue_route),
            });
        }

        let first_segment = self.queue_route.trim_start_matches('/').split('/').next().unwrap_or("");
        let reserved = [routes::OPERATIONS, routes::HELLO]
            .iter()
            .any(|route| route.trim_start_matches('/') == first_segment);
        if reserved || first_segment.parse::<Collection>().is_ok() {
            return Err(ConfigError::InvalidValue {
                field: "queue_route".to_string(),
                reason: format!(
                    "'{}' collides with the gateway route '/{}'",
                    self.queue_route, first_segment
                ),
            });
        }

        if self.max_in_flight == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_in_flight".to_string(),
                reason: "must be at least 1 when set".to_string(),
            });
        }

        if self.api_key.as_deref().is_some_and(|key| key.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "api_key".to_string(),
                reason: "must not be blank when set".to_string(),
            });
        }

        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "backend_url".to_string(),
                reason: format!("'{}' is not an http(s) URL", self.backend_url),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
