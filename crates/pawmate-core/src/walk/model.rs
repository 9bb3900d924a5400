//! Walk session types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped positional sample from the device location source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub recorded_at: DateTime<Utc>,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64, recorded_at: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            recorded_at,
        }
    }
}

/// Live aggregate for one active walk. Exists only between `start` and
/// `stop`; it has no remote counterpart and is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkSession {
    pub match_key: String,
    pub user_id: String,
    /// Most recent accepted sample; absent until the first fix arrives.
    pub last_fix: Option<LocationFix>,
    /// Running total in meters. Only ever grows while the session lives.
    pub distance_m: f64,
}

impl WalkSession {
    pub fn new(match_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            match_key: match_key.into(),
            user_id: user_id.into(),
            last_fix: None,
            distance_m: 0.0,
        }
    }
}

/// Final report handed to the caller when a session stops. Persisting it,
/// if desired, is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkSummary {
    pub match_key: String,
    pub user_id: String,
    pub distance_m: f64,
}
