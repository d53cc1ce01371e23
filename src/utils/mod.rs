// src/utils/mod.rs
//! Shared utilities: error handling, logging, and numeric parsing.

/// Error types and conversions
///
/// Contains the [`DashboardError`] enum used across the crate.
pub mod error;

/// Logging initialization and formatting
pub mod logging;

/// Lenient numeric parsing and browser-compatible number formatting
pub mod numeric;

pub use error::DashboardError;
pub use logging::init_logging;
pub use numeric::parse_leading_f64;
