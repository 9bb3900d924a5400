//! Application layer for Pawmate.
//!
//! Use cases that wire the domain components to a concrete store: one per
//! screen-sized concern, with collaborators and the local user identity
//! injected at construction.

pub mod chat_usecase;
pub mod walk_usecase;

pub use chat_usecase::ChatUseCase;
pub use walk_usecase::WalkUseCase;
