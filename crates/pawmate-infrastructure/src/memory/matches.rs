//! MatchRepository implementation.
//!
//! All mutation happens under the store mutex, which is what gives
//! `insert_proposal` its invariant check and `commit_transition` its
//! compare-and-swap semantics: concurrent transitions on one key are
//! linearized, and the losers observe the already-swapped status.

use super::InMemoryStore;
use crate::dto::matching::{status_code, status_from_code};
use crate::dto::{MatchDocument, MessageDocument};
use async_trait::async_trait;
use pawmate_core::chat::Message;
use pawmate_core::error::{PawmateError, Result};
use pawmate_core::matching::{Match, MatchRepository, MatchStatus, ParticipantPair};

#[async_trait]
impl MatchRepository for InMemoryStore {
    async fn find_by_key(&self, key: &str) -> Result<Option<Match>> {
        let inner = self.lock_inner().lock().await;
        inner
            .matches
            .get(key)
            .map(Match::try_from)
            .transpose()
    }

    async fn find_proposed_for_pair(&self, pair: &ParticipantPair) -> Result<Option<Match>> {
        let inner = self.lock_inner().lock().await;
        for document in inner.matches.values() {
            if document.status != status_code(MatchStatus::Proposed) {
                continue;
            }
            let candidate = Match::try_from(document)?;
            if &candidate.participants == pair {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    async fn insert_proposal(&self, proposal: &Match, request: &Message) -> Result<()> {
        let mut inner = self.lock_inner().lock().await;
        let proposed = status_code(MatchStatus::Proposed);
        if let Some(existing) = inner.matches.values().find(|d| {
            d.status == proposed
                && ParticipantPair::new(&d.user_a, &d.user_b) == proposal.participants
        }) {
            return Err(PawmateError::duplicate_proposal(existing.key.clone()));
        }

        inner
            .matches
            .insert(proposal.key.clone(), MatchDocument::from_domain(proposal));
        inner
            .messages
            .push(MessageDocument::from_domain(request));
        inner.publish_match(proposal);
        inner.publish_message(request);
        Ok(())
    }

    async fn commit_transition(
        &self,
        key: &str,
        expected: MatchStatus,
        next: MatchStatus,
        message: Option<&Message>,
    ) -> Result<Match> {
        let mut inner = self.lock_inner().lock().await;
        let document = inner
            .matches
            .get_mut(key)
            .ok_or_else(|| PawmateError::not_found("match", key))?;
        if status_from_code(&document.status)? != expected {
            return Err(PawmateError::invalid_transition(
                "match",
                key,
                "status changed concurrently",
            ));
        }
        document.status = status_code(next).to_string();
        let updated = Match::try_from(&*document)?;

        if let Some(message) = message {
            inner
                .messages
                .push(MessageDocument::from_domain(message));
            inner.publish_message(message);
        }
        inner.publish_match(&updated);
        Ok(updated)
    }

    async fn count_accepted_for_user(&self, user_id: &str) -> Result<usize> {
        let inner = self.lock_inner().lock().await;
        let accepted = status_code(MatchStatus::Accepted);
        Ok(inner
            .matches
            .values()
            .filter(|d| d.status == accepted && (d.user_a == user_id || d.user_b == user_id))
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pawmate_core::chat::MessageKind;
    use pawmate_core::sync::Synchronizer;

    fn proposal(key: &str) -> (Match, Message) {
        let walk_match = Match {
            key: key.to_string(),
            participants: ParticipantPair::new("alice", "bob"),
            proposer_id: "alice".to_string(),
            conversation_id: "conv-1".to_string(),
            status: MatchStatus::Proposed,
            walk_at: Utc::now(),
        };
        let request = Message::walk_mate(
            MessageKind::WalkMateRequest,
            "alice",
            "conv-1",
            key,
            Utc::now(),
        );
        (walk_match, request)
    }

    #[tokio::test]
    async fn test_insert_proposal_enforces_single_proposed_per_pair() {
        let store = InMemoryStore::new();
        let (first, request) = proposal("match-1");
        store.insert_proposal(&first, &request).await.unwrap();

        let (second, request) = proposal("match-2");
        let err = store.insert_proposal(&second, &request).await.unwrap_err();
        assert_eq!(
            err,
            PawmateError::duplicate_proposal("match-1"),
            "second proposal for the same pair must name the blocker"
        );
        assert!(store.find_by_key("match-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_commit_transition_is_a_compare_and_swap() {
        let store = InMemoryStore::new();
        let (walk_match, request) = proposal("match-1");
        store.insert_proposal(&walk_match, &request).await.unwrap();

        let updated = store
            .commit_transition("match-1", MatchStatus::Proposed, MatchStatus::Accepted, None)
            .await
            .unwrap();
        assert_eq!(updated.status, MatchStatus::Accepted);

        // The swapped status makes a second transition fail.
        let err = store
            .commit_transition("match-1", MatchStatus::Proposed, MatchStatus::Rejected, None)
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
        assert_eq!(
            store.find_by_key("match-1").await.unwrap().unwrap().status,
            MatchStatus::Accepted
        );
    }

    #[tokio::test]
    async fn test_commit_transition_writes_message_and_status_together() {
        let store = InMemoryStore::new();
        let (walk_match, request) = proposal("match-1");
        store.insert_proposal(&walk_match, &request).await.unwrap();

        let mut match_feed = store.subscribe_match("match-1").await;
        let mut message_feed = store.subscribe_messages("conv-1").await;

        let answer = Message::walk_mate(
            MessageKind::WalkMateAccept,
            "bob",
            "conv-1",
            "match-1",
            Utc::now(),
        );
        store
            .commit_transition(
                "match-1",
                MatchStatus::Proposed,
                MatchStatus::Accepted,
                Some(&answer),
            )
            .await
            .unwrap();

        let snapshot = match_feed.recv().await.unwrap().unwrap();
        assert_eq!(snapshot.status, MatchStatus::Accepted);
        let delivered = message_feed.recv().await.unwrap().unwrap();
        assert_eq!(delivered.kind, MessageKind::WalkMateAccept);
    }

    #[tokio::test]
    async fn test_commit_transition_unknown_key_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .commit_transition("missing", MatchStatus::Proposed, MatchStatus::Accepted, None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_count_accepted_for_user() {
        let store = InMemoryStore::new();
        let (walk_match, request) = proposal("match-1");
        store.insert_proposal(&walk_match, &request).await.unwrap();
        store
            .commit_transition("match-1", MatchStatus::Proposed, MatchStatus::Accepted, None)
            .await
            .unwrap();

        assert_eq!(store.count_accepted_for_user("alice").await.unwrap(), 1);
        assert_eq!(store.count_accepted_for_user("carol").await.unwrap(), 0);
    }
}
