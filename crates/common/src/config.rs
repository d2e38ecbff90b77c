//! TOML configuration for the ask-user server

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wait applied when a tool call does not configure its own timeout.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ask_user: AskUserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Tool-call wait configuration. Zero means [`DEFAULT_WAIT_TIMEOUT`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskUserConfig {
    #[serde(default)]
    pub wait_timeout_secs: u64,
}

impl AskUserConfig {
    /// Effective wait duration, applying the zero-means-default rule.
    pub fn wait_timeout(&self) -> Duration {
        if self.wait_timeout_secs == 0 {
            DEFAULT_WAIT_TIMEOUT
        } else {
            Duration::from_secs(self.wait_timeout_secs)
        }
    }
}

impl SystemConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SystemConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
