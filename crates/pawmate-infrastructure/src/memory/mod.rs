//! In-memory document store with change feeds.
//!
//! Stands in for the remote push-capable store: collections of wire
//! documents behind one async mutex, plus per-feed subscriber registries.
//! Fan-out happens inside the same critical section as the write, so a
//! write and its notifications are atomic with respect to other writers -
//! which is also what linearizes match transitions.

mod matches;
mod messages;
mod places;
mod sync;
mod users;

use crate::dto::{FavoriteDocument, MatchDocument, MessageDocument, ReviewDocument, UserDocument};
use pawmate_core::chat::Message;
use pawmate_core::matching::Match;
use pawmate_core::place::Review;
use pawmate_core::sync::FeedSender;
use pawmate_core::user::UserProfile;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// The store. Cheap to share via `Arc`; implements every repository trait
/// plus [`Synchronizer`](pawmate_core::sync::Synchronizer).
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
pub(crate) struct StoreInner {
    pub(crate) messages: Vec<MessageDocument>,
    pub(crate) matches: HashMap<String, MatchDocument>,
    pub(crate) reviews: Vec<ReviewDocument>,
    pub(crate) favorites: Vec<FavoriteDocument>,
    pub(crate) users: HashMap<String, UserDocument>,
    pub(crate) feeds: FeedRegistry,
}

#[derive(Default)]
pub(crate) struct FeedRegistry {
    pub(crate) messages: HashMap<String, Vec<FeedSender<Message>>>,
    pub(crate) matches: HashMap<String, Vec<FeedSender<Match>>>,
    pub(crate) favorite_counts: HashMap<String, Vec<FeedSender<u64>>>,
    pub(crate) favorited: HashMap<(String, String), Vec<FeedSender<bool>>>,
    pub(crate) users_on_walk: Vec<FeedSender<Vec<UserProfile>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user document. Test and bootstrap seam; the registration
    /// flow that would normally create users is outside this system.
    pub async fn insert_user(&self, profile: UserProfile) {
        let mut inner = self.inner.lock().await;
        inner
            .users
            .insert(profile.id.clone(), UserDocument::from_domain(&profile));
        inner.publish_users_on_walk();
    }

    /// Seeds a review document.
    pub async fn insert_review(&self, review: Review) {
        let mut inner = self.inner.lock().await;
        inner.reviews.push(ReviewDocument::from_domain(&review));
    }

    /// Injects a raw message document, bypassing domain validation. This is
    /// the seam for exercising the wire boundary (unknown tags and other
    /// documents a newer writer might produce).
    pub async fn insert_message_document(&self, document: MessageDocument) {
        let mut inner = self.inner.lock().await;
        match Message::try_from(&document) {
            Ok(message) => {
                inner.messages.push(document);
                inner.publish_message(&message);
            }
            Err(error) => {
                // Kept in the collection like any remote write; readers and
                // feeds skip it at decode time.
                tracing::warn!(id = %document.id, %error, "storing undecodable message document");
                inner.messages.push(document);
            }
        }
    }

    pub(crate) fn lock_inner(&self) -> &Mutex<StoreInner> {
        &self.inner
    }
}

impl StoreInner {
    pub(crate) fn publish_message(&mut self, message: &Message) {
        let drained = self
            .feeds
            .messages
            .get_mut(&message.conversation_id)
            .map_or(false, |senders| {
                senders.retain(|sender| sender.send(message.clone()));
                senders.is_empty()
            });
        if drained {
            self.feeds.messages.remove(&message.conversation_id);
        }
    }

    pub(crate) fn publish_match(&mut self, walk_match: &Match) {
        let drained = self
            .feeds
            .matches
            .get_mut(&walk_match.key)
            .map_or(false, |senders| {
                senders.retain(|sender| sender.send(walk_match.clone()));
                senders.is_empty()
            });
        if drained {
            self.feeds.matches.remove(&walk_match.key);
        }
    }

    pub(crate) fn favorite_count_of(&self, place_id: &str) -> u64 {
        self.favorites
            .iter()
            .filter(|f| f.place_id == place_id)
            .count() as u64
    }

    pub(crate) fn publish_favorite_count(&mut self, place_id: &str) {
        let count = self.favorite_count_of(place_id);
        let drained = self
            .feeds
            .favorite_counts
            .get_mut(place_id)
            .map_or(false, |senders| {
                senders.retain(|sender| sender.send(count));
                senders.is_empty()
            });
        if drained {
            self.feeds.favorite_counts.remove(place_id);
        }
    }

    pub(crate) fn publish_favorited(&mut self, place_id: &str, user_id: &str) {
        let favorited = self
            .favorites
            .iter()
            .any(|f| f.place_id == place_id && f.user_id == user_id);
        let key = (place_id.to_string(), user_id.to_string());
        let drained = self.feeds.favorited.get_mut(&key).map_or(false, |senders| {
            senders.retain(|sender| sender.send(favorited));
            senders.is_empty()
        });
        if drained {
            self.feeds.favorited.remove(&key);
        }
    }

    pub(crate) fn users_on_walk_snapshot(&self) -> Vec<UserProfile> {
        self.users
            .values()
            .filter(|u| u.on_walk)
            .map(UserProfile::from)
            .collect()
    }

    pub(crate) fn publish_users_on_walk(&mut self) {
        let snapshot = self.users_on_walk_snapshot();
        self.feeds
            .users_on_walk
            .retain(|sender| sender.send(snapshot.clone()));
    }
}
