//! Test configuration builder for creating config directories on disk

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for `main.toml`
#[derive(Default)]
pub struct TestConfigBuilder {
    port: Option<u16>,
    backend_url: Option<String>,
    queue_route: Option<String>,
    max_in_flight: Option<usize>,
    api_key: Option<String>,
    raw: Option<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn backend_url(mut self, url: &str) -> Self {
        self.backend_url = Some(url.to_string());
        self
    }

    pub fn queue_route(mut self, route: &str) -> Self {
        self.queue_route = Some(route.to_string());
        self
    }

    pub fn max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = Some(max);
        self
    }

    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// Write this text verbatim instead of the generated TOML
    pub fn raw(mut self, content: &str) -> Self {
        self.raw = Some(content.to_string());
        self
    }

    fn to_toml(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut toml = String::new();
        if let Some(port) = self.port {
            toml.push_str(&format!("port = {}\n", port));
        }
        if let Some(url) = &self.backend_url {
            toml.push_str(&format!("backend_url = \"{}\"\n", url));
        }
        if let Some(route) = &self.queue_route {
            toml.push_str(&format!("queue_route = \"{}\"\n", route));
        }
        if let Some(max) = self.max_in_flight {
            toml.push_str(&format!("max_in_flight = {}\n", max));
        }
        if let Some(key) = &self.api_key {
            toml.push_str(&format!("api_key = \"{}\"\n", key));
        }
        toml
    }

    pub fn build(self) -> TestConfig {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_dir = temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");
        fs::write(config_dir.join("main.toml"), self.to_toml()).expect("Failed to write main.toml");

        TestConfig {
            _temp_dir: temp_dir,
            config_dir,
        }
    }
}

/// Config directory that lives as long as this value
pub struct TestConfig {
    _temp_dir: TempDir,
    config_dir: PathBuf,
}

impl TestConfig {
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_dir_string(&self) -> String {
        self.config_dir.to_string_lossy().to_string()
    }
}
