//! Place repository trait.

use super::model::{Favorite, Review};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the per-place favorite and review documents.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// One-shot favorite count for a place.
    async fn favorite_count(&self, place_id: &str) -> Result<u64>;

    /// One-shot review count for a place.
    async fn review_count(&self, place_id: &str) -> Result<u64>;

    /// Every review of a place.
    async fn reviews_for_place(&self, place_id: &str) -> Result<Vec<Review>>;

    /// The most recent reviews of a place, newest first.
    async fn latest_reviews(&self, place_id: &str, limit: usize) -> Result<Vec<Review>>;

    /// Marks a place as a favorite of `favorite.user_id`. Re-favoriting
    /// refreshes the timestamp rather than duplicating the document.
    async fn add_favorite(&self, favorite: &Favorite) -> Result<()>;

    /// Removes the user's favorite mark, if present.
    async fn remove_favorite(&self, place_id: &str, user_id: &str) -> Result<()>;

    /// Whether the user has favorited the place.
    async fn is_favorited(&self, place_id: &str, user_id: &str) -> Result<bool>;
}
