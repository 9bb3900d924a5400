//! Walk use case.
//!
//! Wires the session tracker to a device fix feed and keeps the user's
//! on-walk presence in the store in step with the session lifecycle. The
//! device subscription itself is owned by the caller; this use case only
//! consumes the resulting feed and signals start/stop.

use pawmate_core::config::LocationSettings;
use pawmate_core::error::Result;
use pawmate_core::matching::MatchRepository;
use pawmate_core::sync::{Subscription, Synchronizer};
use pawmate_core::user::{Position, UserProfile, UserRepository};
use pawmate_core::walk::{LocationFix, WalkSessionTracker, WalkSummary};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct WalkUseCase {
    tracker: Arc<WalkSessionTracker>,
    users: Arc<dyn UserRepository>,
    synchronizer: Arc<dyn Synchronizer>,
    settings: LocationSettings,
}

impl WalkUseCase {
    pub fn new(
        matches: Arc<dyn MatchRepository>,
        users: Arc<dyn UserRepository>,
        synchronizer: Arc<dyn Synchronizer>,
        settings: LocationSettings,
    ) -> Self {
        Self {
            tracker: Arc::new(WalkSessionTracker::new(matches)),
            users,
            synchronizer,
            settings,
        }
    }

    /// Intervals for the caller that owns the device location request.
    pub fn location_settings(&self) -> &LocationSettings {
        &self.settings
    }

    /// Starts tracking a walk for an accepted match.
    pub async fn begin_walk(&self, match_key: &str, user_id: &str) -> Result<()> {
        self.tracker.start(match_key, user_id).await
    }

    /// Forwards a device fix feed into the tracker until the feed ends, the
    /// feed fails, or the session stops. The first fix also flags the user
    /// as on-walk at that position, mirroring how a walk announces itself
    /// to the map.
    pub fn spawn_fix_feed(
        &self,
        match_key: impl Into<String>,
        user_id: impl Into<String>,
        mut fixes: Subscription<LocationFix>,
    ) -> JoinHandle<()> {
        let match_key = match_key.into();
        let user_id = user_id.into();
        let tracker = self.tracker.clone();
        let users = self.users.clone();
        tokio::spawn(async move {
            let mut announced = false;
            while let Some(item) = fixes.recv().await {
                match item {
                    Ok(fix) => {
                        if !tracker.is_active(&match_key).await {
                            break;
                        }
                        if !announced {
                            let position = Position {
                                latitude: fix.latitude,
                                longitude: fix.longitude,
                            };
                            if let Err(error) = users.set_on_walk(&user_id, position).await {
                                tracing::warn!(user = %user_id, %error, "could not flag user on-walk");
                            }
                            announced = true;
                        }
                        tracker.record_fix(&match_key, fix).await;
                    }
                    Err(error) => {
                        tracing::error!(key = %match_key, %error, "location feed failed");
                        break;
                    }
                }
            }
            tracing::debug!(key = %match_key, "fix feed ended");
        })
    }

    /// Stops the walk, clears the on-walk flag, and reports the final
    /// distance. Presence cleanup failing does not lose the summary.
    pub async fn end_walk(&self, match_key: &str, user_id: &str) -> Result<WalkSummary> {
        let summary = self.tracker.stop(match_key).await?;
        if let Err(error) = self.users.clear_on_walk(user_id).await {
            tracing::warn!(user = %user_id, %error, "could not clear on-walk flag");
        }
        Ok(summary)
    }

    /// Running total of the active session, if one exists.
    pub async fn distance_m(&self, match_key: &str) -> Option<f64> {
        self.tracker.distance_m(match_key).await
    }

    pub async fn is_walking(&self, match_key: &str) -> bool {
        self.tracker.is_active(match_key).await
    }

    /// Live snapshot feed of everyone currently out on a walk.
    pub async fn users_on_walk(&self) -> Subscription<Vec<UserProfile>> {
        self.synchronizer.subscribe_users_on_walk().await
    }

    pub async fn nickname(&self, user_id: &str) -> Result<Option<String>> {
        self.users.nickname(user_id).await
    }

    pub async fn block_user(&self, user_id: &str, blocked_id: &str) -> Result<()> {
        self.users.block_user(user_id, blocked_id).await
    }
}
