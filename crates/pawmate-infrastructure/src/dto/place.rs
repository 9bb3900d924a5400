//! Wire format of review and favorite documents.

use super::message::timestamp_from_ms;
use pawmate_core::error::{PawmateError, Result};
use pawmate_core::place::{Favorite, Review};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDocument {
    pub id: String,
    pub place_id: String,
    pub user_id: String,
    pub rating: Option<f32>,
    pub comment: String,
    pub created_at_ms: i64,
}

impl ReviewDocument {
    pub fn from_domain(review: &Review) -> Self {
        Self {
            id: review.id.clone(),
            place_id: review.place_id.clone(),
            user_id: review.user_id.clone(),
            rating: review.rating,
            comment: review.comment.clone(),
            created_at_ms: review.created_at.timestamp_millis(),
        }
    }
}

impl TryFrom<&ReviewDocument> for Review {
    type Error = PawmateError;

    fn try_from(document: &ReviewDocument) -> Result<Self> {
        Ok(Review {
            id: document.id.clone(),
            place_id: document.place_id.clone(),
            user_id: document.user_id.clone(),
            rating: document.rating,
            comment: document.comment.clone(),
            created_at: timestamp_from_ms(document.created_at_ms, "created_at_ms")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteDocument {
    pub place_id: String,
    pub user_id: String,
    pub created_at_ms: i64,
}

impl FavoriteDocument {
    pub fn from_domain(favorite: &Favorite) -> Self {
        Self {
            place_id: favorite.place_id.clone(),
            user_id: favorite.user_id.clone(),
            created_at_ms: favorite.created_at.timestamp_millis(),
        }
    }
}

impl TryFrom<&FavoriteDocument> for Favorite {
    type Error = PawmateError;

    fn try_from(document: &FavoriteDocument) -> Result<Self> {
        Ok(Favorite {
            place_id: document.place_id.clone(),
            user_id: document.user_id.clone(),
            created_at: timestamp_from_ms(document.created_at_ms, "created_at_ms")?,
        })
    }
}
