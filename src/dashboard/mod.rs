// src/dashboard/mod.rs
//! Dashboard presentation
//!
//! - [`display`]: the display surface trait and the in-memory [`Board`]
//! - [`presenter`]: the `submit` action and its success/failure rendering
//! - [`session`]: trigger streams feeding `submit`

/// Display surface and terminal board
pub mod display;

/// Update orchestration
pub mod presenter;

/// Trigger streams and the session loop
pub mod session;

pub use display::{Board, DisplaySurface, Section};
pub use presenter::{Presenter, Report, UpdateOutcome, UpdateState};
pub use session::Trigger;
