//! Locally cached, ordered view of one conversation.

use super::model::{classify, Message, MessageDisplayKind};
use tokio::sync::RwLock;

/// An ordered, append-only cache of the messages visible in a conversation.
///
/// The backing store may deliver messages in any order; this store re-derives
/// the display order from `(sent_at, id)` on every insert, so consumers
/// always observe the conversation's total order.
///
/// The local user identity is injected at construction and never read from
/// ambient global state.
pub struct MessageStore {
    local_user_id: String,
    messages: RwLock<Vec<Message>>,
}

impl MessageStore {
    /// Creates an empty store for the given local user.
    pub fn new(local_user_id: impl Into<String>) -> Self {
        Self {
            local_user_id: local_user_id.into(),
            messages: RwLock::new(Vec::new()),
        }
    }

    /// The identity messages are classified against.
    pub fn local_user_id(&self) -> &str {
        &self.local_user_id
    }

    /// Inserts a message at its ordered position.
    ///
    /// Re-delivery of an already-known id is a no-op, so replaying a change
    /// feed is harmless.
    pub async fn append(&self, message: Message) {
        let mut messages = self.messages.write().await;
        if messages.iter().any(|m| m.id == message.id) {
            tracing::debug!(id = %message.id, "skipping duplicate message");
            return;
        }
        let position = messages.partition_point(|m| m.ordering_key() <= message.ordering_key());
        messages.insert(position, message);
    }

    /// Replaces the entire visible list in one step.
    ///
    /// Consumers never observe a partially replaced list: the new list is
    /// sorted outside the lock and swapped in under a single write guard.
    pub async fn set_messages(&self, mut new_messages: Vec<Message>) {
        new_messages.sort_by(|a, b| a.ordering_key().cmp(&b.ordering_key()));
        let mut messages = self.messages.write().await;
        *messages = new_messages;
    }

    /// Snapshot of the conversation in display order.
    pub async fn all_ordered(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// Number of visible messages.
    pub async fn len(&self) -> usize {
        self.messages.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.read().await.is_empty()
    }

    /// Classifies a message for display against the local user identity.
    pub fn classify(&self, message: &Message) -> MessageDisplayKind {
        classify(message, &self.local_user_id)
    }
}
