//! Live walk session tracking.

use super::geo;
use super::model::{LocationFix, WalkSession, WalkSummary};
use crate::error::{PawmateError, Result};
use crate::matching::{MatchRepository, MatchStatus};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Accumulates traveled distance for active walk sessions from pushed
/// location fixes.
///
/// A session may only start for an `Accepted` match; `Rejected` and
/// `Cancelled` matches can never track. The tracker only reacts to fixes it
/// is handed - it never requests samples from the location source.
///
/// Fixes are applied in arrival order under the session lock, which makes
/// the fix-processing path the single writer of `distance_m`; reads from
/// other tasks go through the same lock and are always consistent. Once
/// [`WalkSessionTracker::stop`] returns, the session is gone and any fix
/// still in flight is dropped, so the reported total is final.
pub struct WalkSessionTracker {
    matches: Arc<dyn MatchRepository>,
    sessions: RwLock<HashMap<String, WalkSession>>,
}

impl WalkSessionTracker {
    pub fn new(matches: Arc<dyn MatchRepository>) -> Self {
        Self {
            matches,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Starts a session for `match_key`.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the match does not resolve
    /// - `Unauthorized` when `user_id` is not a participant
    /// - `InvalidTransition` when the match is not `Accepted`, or a session
    ///   for the key is already active
    pub async fn start(&self, match_key: &str, user_id: &str) -> Result<()> {
        let walk_match = self
            .matches
            .find_by_key(match_key)
            .await?
            .ok_or_else(|| PawmateError::not_found("match", match_key))?;

        if !walk_match.is_participant(user_id) {
            return Err(PawmateError::unauthorized(user_id, "track this walk"));
        }
        if walk_match.status != MatchStatus::Accepted {
            return Err(PawmateError::invalid_transition(
                "match",
                match_key,
                "walk tracking requires an accepted match",
            ));
        }

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(match_key) {
            return Err(PawmateError::invalid_transition(
                "walk session",
                match_key,
                "a session is already active for this match",
            ));
        }
        sessions.insert(match_key.to_string(), WalkSession::new(match_key, user_id));
        tracing::debug!(key = match_key, user = user_id, "walk session started");
        Ok(())
    }

    /// Applies one positional sample to the session for `match_key`.
    ///
    /// With a prior fix present, the haversine distance between it and the
    /// new fix is added to the running total; the new fix then becomes
    /// `last_fix` either way (the very first fix seeds the session with
    /// zero distance). Fixes for unknown or stopped sessions are dropped;
    /// accumulation has no failure path.
    pub async fn record_fix(&self, match_key: &str, fix: LocationFix) {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(match_key) else {
            tracing::trace!(key = match_key, "dropping fix for inactive session");
            return;
        };
        if let Some(previous) = &session.last_fix {
            session.distance_m += geo::distance_between(previous, &fix);
        }
        session.last_fix = Some(fix);
    }

    /// Current running total, while the session is active.
    pub async fn distance_m(&self, match_key: &str) -> Option<f64> {
        self.sessions
            .read()
            .await
            .get(match_key)
            .map(|s| s.distance_m)
    }

    pub async fn is_active(&self, match_key: &str) -> bool {
        self.sessions.read().await.contains_key(match_key)
    }

    /// Ends the session and reports its final total.
    ///
    /// The session is discarded; a fix arriving afterwards no longer has a
    /// session to land in, so the summary's distance is the final word.
    pub async fn stop(&self, match_key: &str) -> Result<WalkSummary> {
        let removed = self
            .sessions
            .write()
            .await
            .remove(match_key)
            .ok_or_else(|| PawmateError::not_found("walk session", match_key))?;
        tracing::debug!(
            key = match_key,
            distance_m = removed.distance_m,
            "walk session stopped"
        );
        Ok(WalkSummary {
            match_key: removed.match_key,
            user_id: removed.user_id,
            distance_m: removed.distance_m,
        })
    }
}
