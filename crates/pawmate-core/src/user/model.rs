//! User domain model.

use serde::{Deserialize, Serialize};

/// A plain latitude/longitude position, without the sample timestamp a
/// [`LocationFix`](crate::walk::LocationFix) carries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// The slice of a user document the walk features read and write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub nickname: String,
    /// Whether the user is currently out on a walk.
    pub on_walk: bool,
    /// Last reported position while on a walk.
    pub last_position: Option<Position>,
    /// Ids of users this user has blocked.
    #[serde(default)]
    pub blocked: Vec<String>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            nickname: nickname.into(),
            on_walk: false,
            last_position: None,
            blocked: Vec::new(),
        }
    }
}
