//! Remote change-feed subscriptions.

use super::subscription::Subscription;
use crate::chat::Message;
use crate::matching::Match;
use crate::user::UserProfile;
use async_trait::async_trait;

/// Republishes the backing store's change notifications as typed local
/// feeds.
///
/// Every feed is change-driven: nothing is replayed on subscribe, values
/// may arrive out of order relative to wall-clock write time, and a store
/// failure surfaces as one terminal error item (see
/// [`Subscription`](super::Subscription)). Consumers that need a value
/// before the first change pair the feed with a one-shot read through
/// [`seed_then_live`](super::seed_then_live); consumers that need an order
/// re-derive it from the data, as [`MessageStore`](crate::chat::MessageStore)
/// does.
#[async_trait]
pub trait Synchronizer: Send + Sync {
    /// Messages appended to a conversation.
    async fn subscribe_messages(&self, conversation_id: &str) -> Subscription<Message>;

    /// Latest-state snapshots of one match, emitted on every change.
    async fn subscribe_match(&self, match_key: &str) -> Subscription<Match>;

    /// Favorite count of a place, emitted on every change.
    async fn subscribe_favorite_count(&self, place_id: &str) -> Subscription<u64>;

    /// Whether `user_id` has favorited the place, emitted on every change.
    async fn subscribe_place_favorited(
        &self,
        place_id: &str,
        user_id: &str,
    ) -> Subscription<bool>;

    /// Snapshot of all users currently flagged on-walk, emitted on every
    /// presence change.
    async fn subscribe_users_on_walk(&self) -> Subscription<Vec<UserProfile>>;
}
