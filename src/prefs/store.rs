// src/prefs/store.rs
use crate::utils::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Persists the single worker identifier the dashboard remembers
pub trait PreferenceStore: Send + Sync {
    /// Previously saved identifier, if any
    fn load(&self) -> Option<String>;

    /// Saves `identifier`, replacing any previous value
    ///
    /// # Errors
    /// Returns `DashboardError` if the value could not be persisted
    fn save(&self, identifier: &str) -> Result<(), DashboardError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    #[serde(rename = "workerAddress", skip_serializing_if = "Option::is_none")]
    worker_address: Option<String>,
}

/// [`PreferenceStore`] backed by a small TOML file
///
/// ```toml
/// workerAddress = "bc1q..."
/// ```
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Store reading and writing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FilePreferenceStore { path: path.into() }
    }

    fn read(&self) -> Result<Option<Preferences>, DashboardError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&raw).map(Some).map_err(|e| {
            DashboardError::PreferenceError(format!(
                "Invalid preferences at {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Option<String> {
        match self.read() {
            Ok(prefs) => prefs.and_then(|p| p.worker_address),
            Err(e) => {
                log::warn!("Ignoring saved preferences: {}", e);
                None
            }
        }
    }

    fn save(&self, identifier: &str) -> Result<(), DashboardError> {
        let prefs = Preferences {
            worker_address: Some(identifier.to_string()),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string(&prefs)?)?;
        log::debug!("Saved worker address to {}", self.path.display());
        Ok(())
    }
}
