//! Statistics derived from pool data
//!
//! Converts raw share difficulties and hashrates into tera-units, a
//! progress-bar tier, and block-discovery odds over several horizons.
//! Everything in here is pure; see [`DerivedStats::derive`].

/// Conversion, classification, and odds calculations
pub mod deriver;

pub use deriver::{DerivedStats, HorizonOdds, block_odds_percent, classify};
