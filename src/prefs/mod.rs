// src/prefs/mod.rs
//! Local preference storage
//!
//! Remembers the last submitted worker identifier between runs so the
//! input can be prefilled on startup.

/// Preference store trait and the TOML file implementation
pub mod store;

pub use store::{FilePreferenceStore, PreferenceStore};
