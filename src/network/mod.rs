// src/network/mod.rs
//! Network communication components
//!
//! Two cached fetchers sit on top of a shared [`HttpSource`]:
//! - [`DifficultyFetcher`]: network difficulty, cached by time only
//! - [`WorkerStatusFetcher`]: ckpool user status, cached by identifier and time

/// Network difficulty client
pub mod difficulty;

/// Payload extraction strategies for HTML status pages
pub mod extract;

/// HTTP transport seam
pub mod http;

/// ckpool user status client and snapshot types
pub mod status;

pub use difficulty::DifficultyFetcher;
pub use extract::{BraceRegionExtractor, PayloadExtractor};
pub use http::{HttpSource, ReqwestSource};
pub use status::{UserStatus, WorkerEntry, WorkerStatusFetcher};
