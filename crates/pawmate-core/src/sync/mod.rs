//! Event-feed plumbing.
//!
//! - `subscription`: the uniform lazy, cancellable event sequence
//! - `merge`: the one-shot + live-feed combinator
//! - `synchronizer`: typed change-feed subscriptions over the remote store

mod merge;
mod subscription;
mod synchronizer;

pub use merge::seed_then_live;
pub use subscription::{FeedSender, Subscription};
pub use synchronizer::Synchronizer;
