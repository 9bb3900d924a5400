//! Wire format of user documents.

use pawmate_core::user::{Position, UserProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDocument {
    pub id: String,
    pub nickname: String,
    pub on_walk: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub blocked: Vec<String>,
}

impl UserDocument {
    pub fn from_domain(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            nickname: profile.nickname.clone(),
            on_walk: profile.on_walk,
            latitude: profile.last_position.map(|p| p.latitude),
            longitude: profile.last_position.map(|p| p.longitude),
            blocked: profile.blocked.clone(),
        }
    }
}

impl From<&UserDocument> for UserProfile {
    fn from(document: &UserDocument) -> Self {
        let last_position = match (document.latitude, document.longitude) {
            (Some(latitude), Some(longitude)) => Some(Position {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self {
            id: document.id.clone(),
            nickname: document.nickname.clone(),
            on_walk: document.on_walk,
            last_position,
            blocked: document.blocked.clone(),
        }
    }
}
