//! PlaceRepository implementation.

use super::InMemoryStore;
use crate::dto::FavoriteDocument;
use async_trait::async_trait;
use pawmate_core::error::Result;
use pawmate_core::place::{Favorite, PlaceRepository, Review};

#[async_trait]
impl PlaceRepository for InMemoryStore {
    async fn favorite_count(&self, place_id: &str) -> Result<u64> {
        let inner = self.lock_inner().lock().await;
        Ok(inner.favorite_count_of(place_id))
    }

    async fn review_count(&self, place_id: &str) -> Result<u64> {
        let inner = self.lock_inner().lock().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|r| r.place_id == place_id)
            .count() as u64)
    }

    async fn reviews_for_place(&self, place_id: &str) -> Result<Vec<Review>> {
        let inner = self.lock_inner().lock().await;
        let mut reviews = Vec::new();
        for document in inner.reviews.iter().filter(|r| r.place_id == place_id) {
            match Review::try_from(document) {
                Ok(review) => reviews.push(review),
                Err(error) => {
                    tracing::warn!(id = %document.id, %error, "skipping undecodable review document");
                }
            }
        }
        Ok(reviews)
    }

    async fn latest_reviews(&self, place_id: &str, limit: usize) -> Result<Vec<Review>> {
        let mut reviews = self.reviews_for_place(place_id).await?;
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews.truncate(limit);
        Ok(reviews)
    }

    async fn add_favorite(&self, favorite: &Favorite) -> Result<()> {
        let mut inner = self.lock_inner().lock().await;
        inner
            .favorites
            .retain(|f| !(f.place_id == favorite.place_id && f.user_id == favorite.user_id));
        inner.favorites.push(FavoriteDocument::from_domain(favorite));
        inner.publish_favorite_count(&favorite.place_id);
        inner.publish_favorited(&favorite.place_id, &favorite.user_id);
        Ok(())
    }

    async fn remove_favorite(&self, place_id: &str, user_id: &str) -> Result<()> {
        let mut inner = self.lock_inner().lock().await;
        inner
            .favorites
            .retain(|f| !(f.place_id == place_id && f.user_id == user_id));
        inner.publish_favorite_count(place_id);
        inner.publish_favorited(place_id, user_id);
        Ok(())
    }

    async fn is_favorited(&self, place_id: &str, user_id: &str) -> Result<bool> {
        let inner = self.lock_inner().lock().await;
        Ok(inner
            .favorites
            .iter()
            .any(|f| f.place_id == place_id && f.user_id == user_id))
    }
}
