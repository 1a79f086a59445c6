use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MaternaError, MaternaResult};

/// Configuration for a MaternaNode instance.
///
/// Built once at process start and handed to the node and HTTP server by
/// value; nothing in the crate reads configuration from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Path where the node will store its data
    pub storage_path: PathBuf,
    /// HTTP bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Token signing configuration
    pub auth: AuthConfig,
    /// Outbound notification configuration
    #[serde(default)]
    pub notifier: NotifierConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

/// Shared-secret token signing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret for bearer tokens
    pub token_secret: String,
}

/// Mail relay settings for the credentials notifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// HTTP mail relay endpoint; when absent, notifications are logged and
    /// dropped (development mode)
    #[serde(default)]
    pub relay_url: Option<String>,
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Per-request timeout toward the relay
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Delivery attempts before an outbox entry is dropped
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Outbox poll interval
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_from_address() -> String {
    "no-reply@maternal-health.example".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_attempts() -> u32 {
    5
}

fn default_poll_interval_secs() -> u64 {
    30
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            from_address: default_from_address(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl NodeConfig {
    /// Create a configuration with the given storage path and token secret.
    pub fn new(storage_path: PathBuf, token_secret: &str) -> Self {
        Self {
            storage_path,
            bind_address: default_bind_address(),
            auth: AuthConfig {
                token_secret: token_secret.to_string(),
            },
            notifier: NotifierConfig::default(),
        }
    }

    /// Set the HTTP bind address.
    pub fn with_bind_address(mut self, address: &str) -> Self {
        self.bind_address = address.to_string();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> MaternaResult<()> {
        if self.auth.token_secret.is_empty() {
            return Err(MaternaError::Config(
                "auth.token_secret must not be empty".to_string(),
            ));
        }
        if self.notifier.max_attempts == 0 {
            return Err(MaternaError::Config(
                "notifier.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load a node configuration from the given path or from the
/// `MATERNA_CONFIG` environment variable.
///
/// If the file does not exist, a default configuration with a development
/// token secret is returned and a warning is logged.
pub fn load_node_config(path: Option<&str>, port: Option<u16>) -> MaternaResult<NodeConfig> {
    use std::fs;

    let config_path = path
        .map(|p| p.to_string())
        .or_else(|| std::env::var("MATERNA_CONFIG").ok())
        .unwrap_or_else(|| "config/materna_config.json".to_string());

    let mut config = if let Ok(config_str) = fs::read_to_string(&config_path) {
        serde_json::from_str::<NodeConfig>(&config_str).map_err(|e| {
            log::error!("Failed to parse node configuration: {}", e);
            MaternaError::Config(format!("invalid configuration file {}: {}", config_path, e))
        })?
    } else {
        log::warn!(
            "No configuration at {}, using defaults with a development token secret",
            config_path
        );
        NodeConfig::new(PathBuf::from("data"), "development-only-secret")
    };

    if let Some(p) = port {
        config.bind_address = format!("127.0.0.1:{}", p);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = NodeConfig::new(PathBuf::from("data"), "secret");
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address, "127.0.0.1:8000");
        assert_eq!(config.notifier.max_attempts, 5);
    }

    #[test]
    fn empty_secret_rejected() {
        let config = NodeConfig::new(PathBuf::from("data"), "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_json() {
        let config: NodeConfig = serde_json::from_str(
            r#"{"storage_path": "/tmp/materna", "auth": {"token_secret": "s"}}"#,
        )
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8000");
        assert!(config.notifier.relay_url.is_none());
        assert_eq!(config.notifier.timeout_secs, 10);
    }
}
