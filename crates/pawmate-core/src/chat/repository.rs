//! Message repository trait.

use super::model::Message;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the message collection of the backing store.
///
/// Implementations persist messages and notify the matching change feed;
/// delivery order on the feed is not guaranteed to follow append order.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Appends a message to its conversation.
    async fn append(&self, message: &Message) -> Result<()>;

    /// Fetches every stored message of a conversation.
    ///
    /// Documents that fail to decode are skipped and reported, never fatal
    /// to the fetch.
    async fn conversation(&self, conversation_id: &str) -> Result<Vec<Message>>;
}
