//! Place-related domain model: reviews and favorites.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's review of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    /// Star rating. Some clients submit reviews without one; a missing
    /// rating counts as `0` in averages.
    pub rating: Option<f32>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A user's favorite mark on a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub place_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
