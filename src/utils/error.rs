// src/utils/error.rs
use std::io;
use thiserror::Error;

/// Main error type for the dashboard
///
/// Fetchers and the preference store convert these into logged sentinels at
/// their boundary; everything else propagates them with `?`.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Configuration file or parameter errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Preference file could not be read or written
    #[error("Preference store error: {0}")]
    PreferenceError(String),

    /// A response body did not hold the expected value
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The status page carried no embedded payload
    #[error("No JSON data found in {0}")]
    MissingPayload(String),

    /// Invalid user input or parameter errors
    #[error("Invalid input: {0}")]
    InputError(String),
}

impl From<toml::de::Error> for DashboardError {
    fn from(e: toml::de::Error) -> Self {
        DashboardError::ConfigError(format!("Invalid config format: {}", e))
    }
}

impl From<toml::ser::Error> for DashboardError {
    fn from(e: toml::ser::Error) -> Self {
        DashboardError::PreferenceError(format!("Serialization failed: {}", e))
    }
}
