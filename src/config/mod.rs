// src/config/mod.rs
//! Configuration management
//!
//! Endpoints, cache lifetime, timeouts, and the preference file location
//! are read from a TOML file. Every key has a default, and a missing file
//! is treated as an empty one.

/// Core configuration implementation
pub mod config;

pub use config::Config;

use crate::utils::error::DashboardError;
use std::path::PathBuf;

/// Loads configuration, falling back to defaults when the file is absent
///
/// # Arguments
/// * `path` - Path to the configuration file (anything convertible to PathBuf)
///
/// # Returns
/// * `Ok(Config)` - Loaded configuration, or defaults when the file is missing
/// * `Err(DashboardError)` - If the file exists but couldn't be read or parsed
pub fn load(path: impl Into<PathBuf>) -> Result<Config, DashboardError> {
    Config::load_or_default(path)
}

/// Generates a commented configuration template
///
/// # Returns
/// String containing a ready-to-use TOML configuration template
pub fn generate_template() -> String {
    Config::generate_template()
}
