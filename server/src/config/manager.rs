// File: server/src/config/manager.rs
use super::Config;
use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::errors::ConfigError;

/// Environment variable that overrides `backend_url` from the config file
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

/// Environment variable that sets `api_key`, keeping the secret out of the file
pub const API_KEY_ENV: &str = "GATEWAY_API_KEY";

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = Path::new(config_dir).join("main.toml");

        let mut config = if fs::try_exists(&main_config_path).await.unwrap_or(false) {
            debug!("Loading config: {}", main_config_path.display());
            let content = fs::read_to_string(&main_config_path).await.map_err(|e| {
                ConfigError::LoadFailed {
                    path: main_config_path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;

            toml::from_str::<Config>(&content).map_err(|e| ConfigError::ParseError {
                reason: e.to_string(),
            })?
        } else {
            info!(
                "No config at {}, using built-in defaults",
                main_config_path.display()
            );
            Config::default()
        };

        if let Ok(backend_url) = std::env::var(BACKEND_URL_ENV) {
            if !backend_url.is_empty() {
                debug!("Backend URL overridden from environment");
                config.backend_url = backend_url;
            }
        }

        if let Ok(api_key) = std::env::var(API_KEY_ENV) {
            if !api_key.is_empty() {
                debug!("API key taken from environment");
                config.api_key = Some(api_key);
            }
        }

        if config.api_key.is_none() {
            warn!("No api_key configured, the gateway accepts unauthenticated requests");
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration in {}: {}", config_dir, e))?;

        info!(
            "Configuration loaded: listen {}, backend {}, queue route {}",
            config.bind_address(),
            config.backend_url,
            config.queue_route
        );

        Ok(config)
    }
}
