//! Favorite and review aggregation for one place.

use super::model::{Favorite, Review};
use super::repository::PlaceRepository;
use crate::error::Result;
use crate::sync::{seed_then_live, Subscription, Synchronizer};
use std::sync::Arc;

/// Combines one-shot reads and live counter feeds into the per-place
/// numbers the UI shows.
pub struct FavoriteReviewAggregator {
    places: Arc<dyn PlaceRepository>,
    synchronizer: Arc<dyn Synchronizer>,
}

impl FavoriteReviewAggregator {
    pub fn new(places: Arc<dyn PlaceRepository>, synchronizer: Arc<dyn Synchronizer>) -> Self {
        Self {
            places,
            synchronizer,
        }
    }

    /// Live favorite count, seeded from a one-shot read so consumers are
    /// not left with an empty state until the first change arrives.
    pub async fn live_favorite_count(&self, place_id: &str) -> Subscription<u64> {
        let live = self.synchronizer.subscribe_favorite_count(place_id).await;
        let places = self.places.clone();
        let place_id = place_id.to_string();
        seed_then_live(async move { places.favorite_count(&place_id).await }, live)
    }

    /// Live per-user favorited flag, seeded the same way.
    pub async fn live_favorited(&self, place_id: &str, user_id: &str) -> Subscription<bool> {
        let live = self
            .synchronizer
            .subscribe_place_favorited(place_id, user_id)
            .await;
        let places = self.places.clone();
        let (place_id, user_id) = (place_id.to_string(), user_id.to_string());
        seed_then_live(
            async move { places.is_favorited(&place_id, &user_id).await },
            live,
        )
    }

    /// Mean rating over the full review set. Reviews without a rating count
    /// as `0`; an empty set yields `0.0` rather than an error.
    pub async fn average_rating(&self, place_id: &str) -> Result<f32> {
        let reviews = self.places.reviews_for_place(place_id).await?;
        if reviews.is_empty() {
            return Ok(0.0);
        }
        let total: f32 = reviews.iter().map(|r| r.rating.unwrap_or(0.0)).sum();
        Ok(total / reviews.len() as f32)
    }

    pub async fn review_count(&self, place_id: &str) -> Result<u64> {
        self.places.review_count(place_id).await
    }

    pub async fn latest_reviews(&self, place_id: &str, limit: usize) -> Result<Vec<Review>> {
        self.places.latest_reviews(place_id, limit).await
    }

    pub async fn add_favorite(&self, favorite: &Favorite) -> Result<()> {
        self.places.add_favorite(favorite).await
    }

    pub async fn remove_favorite(&self, place_id: &str, user_id: &str) -> Result<()> {
        self.places.remove_favorite(place_id, user_id).await
    }

    pub async fn is_favorited(&self, place_id: &str, user_id: &str) -> Result<bool> {
        self.places.is_favorited(place_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Message;
    use crate::matching::Match;
    use crate::sync::FeedSender;
    use crate::user::UserProfile;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPlaceRepository {
        reviews: Mutex<Vec<Review>>,
        favorite_count: Mutex<u64>,
    }

    #[async_trait::async_trait]
    impl PlaceRepository for MockPlaceRepository {
        async fn favorite_count(&self, _place_id: &str) -> Result<u64> {
            Ok(*self.favorite_count.lock().unwrap())
        }

        async fn review_count(&self, place_id: &str) -> Result<u64> {
            Ok(self
                .reviews
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.place_id == place_id)
                .count() as u64)
        }

        async fn reviews_for_place(&self, place_id: &str) -> Result<Vec<Review>> {
            Ok(self
                .reviews
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.place_id == place_id)
                .cloned()
                .collect())
        }

        async fn latest_reviews(&self, place_id: &str, limit: usize) -> Result<Vec<Review>> {
            let mut reviews = self.reviews_for_place(place_id).await?;
            reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            reviews.truncate(limit);
            Ok(reviews)
        }

        async fn add_favorite(&self, _favorite: &Favorite) -> Result<()> {
            *self.favorite_count.lock().unwrap() += 1;
            Ok(())
        }

        async fn remove_favorite(&self, _place_id: &str, _user_id: &str) -> Result<()> {
            *self.favorite_count.lock().unwrap() -= 1;
            Ok(())
        }

        async fn is_favorited(&self, _place_id: &str, _user_id: &str) -> Result<bool> {
            Ok(false)
        }
    }

    // Synchronizer stub whose feeds never fire; the seed side of the merge
    // is what these tests exercise.
    struct SilentSynchronizer {
        favorite_senders: Mutex<Vec<FeedSender<u64>>>,
    }

    impl SilentSynchronizer {
        fn new() -> Self {
            Self {
                favorite_senders: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Synchronizer for SilentSynchronizer {
        async fn subscribe_messages(&self, _conversation_id: &str) -> Subscription<Message> {
            Subscription::channel().1
        }

        async fn subscribe_match(&self, _match_key: &str) -> Subscription<Match> {
            Subscription::channel().1
        }

        async fn subscribe_favorite_count(&self, _place_id: &str) -> Subscription<u64> {
            let (tx, sub) = Subscription::channel();
            self.favorite_senders.lock().unwrap().push(tx);
            sub
        }

        async fn subscribe_place_favorited(
            &self,
            _place_id: &str,
            _user_id: &str,
        ) -> Subscription<bool> {
            Subscription::channel().1
        }

        async fn subscribe_users_on_walk(&self) -> Subscription<Vec<UserProfile>> {
            Subscription::channel().1
        }
    }

    fn review(place_id: &str, rating: Option<f32>) -> Review {
        Review {
            id: uuid::Uuid::new_v4().to_string(),
            place_id: place_id.to_string(),
            user_id: "reviewer".to_string(),
            rating,
            comment: "woof".to_string(),
            created_at: Utc::now(),
        }
    }

    fn aggregator(repository: Arc<MockPlaceRepository>) -> FavoriteReviewAggregator {
        FavoriteReviewAggregator::new(repository, Arc::new(SilentSynchronizer::new()))
    }

    #[tokio::test]
    async fn test_average_rating_counts_missing_as_zero() {
        let repository = Arc::new(MockPlaceRepository::default());
        {
            let mut reviews = repository.reviews.lock().unwrap();
            reviews.push(review("place-1", Some(4.0)));
            reviews.push(review("place-1", Some(2.0)));
            reviews.push(review("place-1", None));
        }

        let average = aggregator(repository)
            .average_rating("place-1")
            .await
            .unwrap();
        assert!((average - 2.0).abs() < f32::EPSILON, "got {average}");
    }

    #[tokio::test]
    async fn test_average_rating_of_empty_set_is_zero() {
        let repository = Arc::new(MockPlaceRepository::default());
        assert_eq!(
            aggregator(repository).average_rating("place-1").await,
            Ok(0.0)
        );
    }

    #[tokio::test]
    async fn test_live_favorite_count_seeds_from_one_shot() {
        let repository = Arc::new(MockPlaceRepository::default());
        *repository.favorite_count.lock().unwrap() = 7;

        let synchronizer = Arc::new(SilentSynchronizer::new());
        let aggregator = FavoriteReviewAggregator::new(repository, synchronizer.clone());

        let mut count = aggregator.live_favorite_count("place-1").await;
        assert_eq!(count.recv().await, Some(Ok(7)));

        // A live update supersedes the seed from here on.
        synchronizer.favorite_senders.lock().unwrap()[0].send(8);
        assert_eq!(count.recv().await, Some(Ok(8)));
    }

    #[tokio::test]
    async fn test_latest_reviews_are_newest_first() {
        let repository = Arc::new(MockPlaceRepository::default());
        {
            let mut reviews = repository.reviews.lock().unwrap();
            let mut old = review("place-1", Some(3.0));
            old.created_at = Utc::now() - chrono::Duration::days(2);
            old.comment = "old".to_string();
            let mut new = review("place-1", Some(5.0));
            new.comment = "new".to_string();
            reviews.push(old);
            reviews.push(new);
        }

        let latest = aggregator(repository)
            .latest_reviews("place-1", 1)
            .await
            .unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].comment, "new");
    }
}
