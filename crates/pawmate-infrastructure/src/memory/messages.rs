//! MessageRepository implementation.

use super::InMemoryStore;
use crate::dto::MessageDocument;
use async_trait::async_trait;
use pawmate_core::chat::{Message, MessageRepository};
use pawmate_core::error::Result;

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn append(&self, message: &Message) -> Result<()> {
        let mut inner = self.lock_inner().lock().await;
        inner.messages.push(MessageDocument::from_domain(message));
        inner.publish_message(message);
        Ok(())
    }

    async fn conversation(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let inner = self.lock_inner().lock().await;
        let mut messages = Vec::new();
        for document in inner
            .messages
            .iter()
            .filter(|d| d.conversation_id == conversation_id)
        {
            match Message::try_from(document) {
                Ok(message) => messages.push(message),
                Err(error) => {
                    // Skip-and-report: one bad document never fails the fetch.
                    tracing::warn!(id = %document.id, %error, "skipping undecodable message document");
                }
            }
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pawmate_core::sync::Synchronizer;

    #[tokio::test]
    async fn test_append_delivers_to_subscribers() {
        let store = InMemoryStore::new();
        let mut feed = store.subscribe_messages("conv-1").await;
        let mut other_feed = store.subscribe_messages("conv-2").await;

        let message = Message::text("alice", "conv-1", "hello", Utc::now());
        store.append(&message).await.unwrap();

        let delivered = feed.recv().await.unwrap().unwrap();
        assert_eq!(delivered.id, message.id);

        // The other conversation's feed stays quiet.
        store
            .append(&Message::text("alice", "conv-1", "again", Utc::now()))
            .await
            .unwrap();
        feed.recv().await.unwrap().unwrap();
        other_feed.close();
        assert_eq!(other_feed.recv().await, None);
    }

    #[tokio::test]
    async fn test_conversation_skips_undecodable_documents() {
        let store = InMemoryStore::new();
        store
            .append(&Message::text("alice", "conv-1", "fine", Utc::now()))
            .await
            .unwrap();
        store
            .insert_message_document(MessageDocument {
                id: "bad".to_string(),
                sender_id: "alice".to_string(),
                conversation_id: "conv-1".to_string(),
                kind: 99,
                content: String::new(),
                sent_at_ms: Utc::now().timestamp_millis(),
            })
            .await;

        let messages = store.conversation("conv-1").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "fine");
    }

    #[tokio::test]
    async fn test_closed_subscription_observes_nothing_further() {
        let store = InMemoryStore::new();
        let mut feed = store.subscribe_messages("conv-1").await;

        store
            .append(&Message::text("alice", "conv-1", "in flight", Utc::now()))
            .await
            .unwrap();
        feed.close();
        assert_eq!(feed.recv().await, None);

        // The registry notices the closed subscriber on the next publish.
        store
            .append(&Message::text("alice", "conv-1", "later", Utc::now()))
            .await
            .unwrap();
        assert_eq!(feed.recv().await, None);
    }
}
