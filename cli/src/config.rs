// File: cli/src/config.rs
use anyhow::{anyhow, Result};
use std::time::Duration;
use tracing::warn;

use crate::constants::{defaults, env};

/// Where the gateway lives and how patiently to wait on its operations
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub poll_interval: Duration,
    /// Give up polling after this long; `None` waits for as long as it takes
    pub timeout: Option<Duration>,
    /// Sent as a bearer token on every request when set
    pub api_key: Option<String>,
}

impl ClientConfig {
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(defaults::POLL_INTERVAL_MS),
            timeout: None,
            api_key: None,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_env_with_server(None)
    }

    /// Read settings from the environment, taking the server from `server`
    /// when given instead of from the environment.
    pub fn from_env_with_server(server: Option<&str>) -> Result<Self> {
        let server_url = server
            .map(str::to_string)
            .or_else(|| std::env::var(env::SERVER).ok())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| anyhow!("You need a server! Set {} or pass --server", env::SERVER))?;

        let mut config = Self::new(&server_url);

        if let Ok(raw) = std::env::var(env::POLL_MS) {
            let millis: u64 = raw
                .parse()
                .map_err(|_| anyhow!("{} must be a number of milliseconds, got '{}'", env::POLL_MS, raw))?;
            if millis == 0 {
                warn!("{} is 0, polling without pause", env::POLL_MS);
            }
            config.poll_interval = Duration::from_millis(millis);
        }

        if let Ok(raw) = std::env::var(env::TIMEOUT_SECONDS) {
            let seconds: u64 = raw
                .parse()
                .map_err(|_| anyhow!("{} must be a number of seconds, got '{}'", env::TIMEOUT_SECONDS, raw))?;
            config.timeout = Some(Duration::from_secs(seconds));
        }

        config.api_key = std::env::var(env::KEY).ok().filter(|key| !key.is_empty());

        Ok(config)
    }
}
