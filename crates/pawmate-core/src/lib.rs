//! Pawmate domain core.
//!
//! Coordinates dog-walk meetups between paired users: a typed chat stream,
//! the walk-mate match state machine, live walk distance tracking, change
//! feeds from the backing store, and per-place favorite/review aggregation.
//!
//! The core is storage-agnostic: persistence and change feeds are reached
//! through the repository and [`sync::Synchronizer`] traits, implemented by
//! `pawmate-infrastructure`.

pub mod chat;
pub mod config;
pub mod error;
pub mod matching;
pub mod place;
pub mod sync;
pub mod user;
pub mod walk;

// Re-export common error type
pub use error::{PawmateError, Result};
