//! ckpool dashboard - solo-mining statistics in the terminal
//!
//! Polls a ckpool user status page and a network-difficulty endpoint, then
//! derives:
//! - best share and best ever in tera-units
//! - best share as a percentage of the network difficulty
//! - odds of finding a block within a day, week, month, and year

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Single-slot time-bounded cache
pub mod cache;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Display surface, presenter, and session loop
pub mod dashboard;

/// Network fetchers for difficulty and worker status
pub mod network;

/// Local preference storage
pub mod prefs;

/// Derived statistics
pub mod stats;

/// Shared type definitions
pub mod types;

/// Utility functions and error handling
pub mod utils;

// Core exports
pub use cache::TimedCache;
pub use cli::Commands;
pub use config::Config;
pub use dashboard::{Board, DisplaySurface, Presenter, UpdateOutcome, UpdateState};
pub use network::{DifficultyFetcher, HttpSource, ReqwestSource, UserStatus, WorkerStatusFetcher};
pub use prefs::{FilePreferenceStore, PreferenceStore};
pub use stats::DerivedStats;
pub use types::{BarClass, Field, Horizon};
pub use utils::{DashboardError, init_logging};
