//! Chat domain module.
//!
//! - `model`: message types and display classification
//! - `store`: ordered local cache of one conversation
//! - `repository`: persistence trait for the message collection

mod model;
mod repository;
mod store;

pub use model::{classify, Message, MessageDisplayKind, MessageKind};
pub use repository::MessageRepository;
pub use store::MessageStore;
