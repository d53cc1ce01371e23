// src/config/config.rs
use crate::network::difficulty::DEFAULT_DIFFICULTY_URL;
use crate::network::status::{DEFAULT_RELAY_URL, DEFAULT_STATUS_BASE_URL};
use crate::utils::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for the dashboard
///
/// Every key is optional in the file; missing keys take the defaults
/// below, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Endpoint returning the network difficulty as plain text
    #[serde(default = "default_difficulty_url")]
    pub difficulty_url: String,

    /// Base URL of the ckpool user status pages
    #[serde(default = "default_status_base_url")]
    pub status_base_url: String,

    /// Relay prefix the encoded status URL is appended to ("" disables)
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    /// Lifetime of cached difficulty and worker data, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Per-request timeout in seconds (none by default)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// File remembering the last submitted worker
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,
}

fn default_difficulty_url() -> String {
    DEFAULT_DIFFICULTY_URL.into()
}

fn default_status_base_url() -> String {
    DEFAULT_STATUS_BASE_URL.into()
}

fn default_relay_url() -> String {
    DEFAULT_RELAY_URL.into()
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("preferences.toml")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            difficulty_url: default_difficulty_url(),
            status_base_url: default_status_base_url(),
            relay_url: default_relay_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
            request_timeout_secs: None,
            preferences_path: default_preferences_path(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Errors
    /// Returns `DashboardError::ConfigError` if the file can't be read or parsed
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DashboardError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            DashboardError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(toml::from_str(&config_str)?)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults
    ///
    /// # Errors
    /// Returns `DashboardError::ConfigError` if the file exists but is invalid
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, DashboardError> {
        let path = path.into();
        match std::fs::metadata(&path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Config::default())
            }
            _ => Config::load(path),
        }
    }

    /// Cache lifetime as a `Duration`
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Relay prefix, or `None` when relaying is disabled
    pub fn relay(&self) -> Option<String> {
        let relay = self.relay_url.trim();
        (!relay.is_empty()).then(|| relay.to_string())
    }

    /// Generates a commented configuration template
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# ckpool dashboard configuration\n\n");
        template.push_str("# Plain-text network difficulty endpoint\n");
        template.push_str(&format!("difficulty_url = \"{}\"\n", DEFAULT_DIFFICULTY_URL));
        template.push_str("# ckpool user status pages; the worker address is appended\n");
        template.push_str(&format!("status_base_url = \"{}\"\n", DEFAULT_STATUS_BASE_URL));
        template.push_str("# Relay prefix for the status request (\"\" to request directly)\n");
        template.push_str(&format!("relay_url = \"{}\"\n", DEFAULT_RELAY_URL));
        template.push_str("# Seconds before cached difficulty / worker data is refetched\n");
        template.push_str("cache_ttl_secs = 60\n");
        template.push_str("# Per-request timeout in seconds (unset = no timeout)\n");
        template.push_str("# request_timeout_secs = 15\n");
        template.push_str("# Where the last submitted worker address is remembered\n");
        template.push_str("preferences_path = \"preferences.toml\"\n");
        template
    }
}
