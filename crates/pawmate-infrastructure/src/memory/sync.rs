//! Synchronizer implementation.
//!
//! Subscriptions register a sender in the matching registry; publication
//! happens store-side under the same lock as the triggering write. Closed
//! subscribers are pruned on the next publish.

use super::InMemoryStore;
use async_trait::async_trait;
use pawmate_core::chat::Message;
use pawmate_core::matching::Match;
use pawmate_core::sync::{Subscription, Synchronizer};
use pawmate_core::user::UserProfile;

#[async_trait]
impl Synchronizer for InMemoryStore {
    async fn subscribe_messages(&self, conversation_id: &str) -> Subscription<Message> {
        let (tx, subscription) = Subscription::channel();
        let mut inner = self.lock_inner().lock().await;
        inner
            .feeds
            .messages
            .entry(conversation_id.to_string())
            .or_default()
            .push(tx);
        subscription
    }

    async fn subscribe_match(&self, match_key: &str) -> Subscription<Match> {
        let (tx, subscription) = Subscription::channel();
        let mut inner = self.lock_inner().lock().await;
        inner
            .feeds
            .matches
            .entry(match_key.to_string())
            .or_default()
            .push(tx);
        subscription
    }

    async fn subscribe_favorite_count(&self, place_id: &str) -> Subscription<u64> {
        let (tx, subscription) = Subscription::channel();
        let mut inner = self.lock_inner().lock().await;
        inner
            .feeds
            .favorite_counts
            .entry(place_id.to_string())
            .or_default()
            .push(tx);
        subscription
    }

    async fn subscribe_place_favorited(
        &self,
        place_id: &str,
        user_id: &str,
    ) -> Subscription<bool> {
        let (tx, subscription) = Subscription::channel();
        let mut inner = self.lock_inner().lock().await;
        inner
            .feeds
            .favorited
            .entry((place_id.to_string(), user_id.to_string()))
            .or_default()
            .push(tx);
        subscription
    }

    async fn subscribe_users_on_walk(&self) -> Subscription<Vec<UserProfile>> {
        let (tx, subscription) = Subscription::channel();
        let mut inner = self.lock_inner().lock().await;
        inner.feeds.users_on_walk.push(tx);
        subscription
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pawmate_core::chat::MessageRepository;
    use pawmate_core::matching::{MatchStateMachine, MatchStatus, ParticipantPair, WalkDecision};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_match_feed_delivers_latest_snapshots() {
        let store = Arc::new(InMemoryStore::new());
        let machine = MatchStateMachine::new(store.clone());
        let proposed = machine
            .propose("alice", "bob", "conv-1", Utc::now())
            .await
            .unwrap();

        let mut feed = store.subscribe_match(&proposed.key).await;
        machine
            .respond(&proposed.key, "bob", WalkDecision::Accept)
            .await
            .unwrap();

        let snapshot = feed.recv().await.unwrap().unwrap();
        assert_eq!(snapshot.status, MatchStatus::Accepted);
        assert_eq!(snapshot.participants, ParticipantPair::new("alice", "bob"));
    }

    #[tokio::test]
    async fn test_proposal_insert_notifies_both_feeds() {
        let store = Arc::new(InMemoryStore::new());
        let mut messages = store.subscribe_messages("conv-1").await;

        let machine = MatchStateMachine::new(store.clone());
        let proposed = machine
            .propose("alice", "bob", "conv-1", Utc::now())
            .await
            .unwrap();

        let request = messages.recv().await.unwrap().unwrap();
        assert_eq!(request.content, proposed.key);

        // A feed opened after the write sees nothing replayed.
        let mut late = store.subscribe_messages("conv-1").await;
        late.close();
        assert_eq!(late.recv().await, None);

        // Appending a plain text message reaches the original feed too.
        store
            .append(&Message::text("bob", "conv-1", "see you there", Utc::now()))
            .await
            .unwrap();
        assert_eq!(
            messages.recv().await.unwrap().unwrap().content,
            "see you there"
        );
    }
}
