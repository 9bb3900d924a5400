//! Walk-mate match state machine.
//!
//! Sole mutation gate for the match lifecycle: `Proposed` advances to
//! `Accepted`/`Rejected` through [`MatchStateMachine::respond`] or to
//! `Cancelled` through [`MatchStateMachine::cancel`]; every transition emits
//! (or deliberately omits) the corresponding chat message atomically with
//! the status change.

use super::model::{Match, MatchStatus, ParticipantPair, WalkDecision};
use super::repository::MatchRepository;
use crate::chat::{Message, MessageKind};
use crate::error::{PawmateError, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Result of resolving a walk-mate message to its match for rendering.
///
/// A lookup miss or store error is a non-fatal display state: the message
/// stays visible, its proposal details are simply unavailable.
#[derive(Debug, Clone, PartialEq)]
pub enum ProposalDetails {
    Resolved(Match),
    Unresolved,
}

/// Drives match lifecycle transitions against a [`MatchRepository`].
///
/// The machine itself is stateless; linearization of concurrent transitions
/// is delegated to the repository's compare-and-swap commit, so any number
/// of machine instances over the same repository stay consistent.
pub struct MatchStateMachine {
    matches: Arc<dyn MatchRepository>,
}

impl MatchStateMachine {
    pub fn new(matches: Arc<dyn MatchRepository>) -> Self {
        Self { matches }
    }

    /// Proposes a walk to `invitee_id`, creating a `Proposed` match and
    /// emitting a `WalkMateRequest` message into the conversation.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` when proposer and invitee are the same user
    /// - `DuplicateProposal` when a `Proposed` match already exists for the
    ///   pair (the first proposal stays `Proposed`)
    pub async fn propose(
        &self,
        proposer_id: &str,
        invitee_id: &str,
        conversation_id: &str,
        walk_at: DateTime<Utc>,
    ) -> Result<Match> {
        if proposer_id == invitee_id {
            return Err(PawmateError::invalid_transition(
                "match",
                "",
                "proposer and invitee must differ",
            ));
        }

        let pair = ParticipantPair::new(proposer_id, invitee_id);
        if let Some(existing) = self.matches.find_proposed_for_pair(&pair).await? {
            return Err(PawmateError::duplicate_proposal(existing.key));
        }

        let proposal = Match {
            key: uuid::Uuid::new_v4().to_string(),
            participants: pair,
            proposer_id: proposer_id.to_string(),
            conversation_id: conversation_id.to_string(),
            status: MatchStatus::Proposed,
            walk_at,
        };
        let request = Message::walk_mate(
            MessageKind::WalkMateRequest,
            proposer_id,
            conversation_id,
            &proposal.key,
            Utc::now(),
        );
        self.matches.insert_proposal(&proposal, &request).await?;
        tracing::debug!(key = %proposal.key, proposer = proposer_id, "walk proposed");
        Ok(proposal)
    }

    /// Answers a `Proposed` match, advancing it to the decision's terminal
    /// status and emitting the accept/reject message atomically.
    ///
    /// # Errors
    ///
    /// - `NotFound` when the key does not resolve
    /// - `Unauthorized` when the responder is not a participant
    /// - `InvalidTransition` when the match is no longer `Proposed` (of two
    ///   concurrent responses exactly one wins; the other ends up here)
    pub async fn respond(
        &self,
        match_key: &str,
        responder_id: &str,
        decision: WalkDecision,
    ) -> Result<Match> {
        let current = self
            .matches
            .find_by_key(match_key)
            .await?
            .ok_or_else(|| PawmateError::not_found("match", match_key))?;

        if !current.is_participant(responder_id) {
            return Err(PawmateError::unauthorized(
                responder_id,
                "respond to this walk proposal",
            ));
        }
        if current.status != MatchStatus::Proposed {
            return Err(PawmateError::invalid_transition(
                "match",
                match_key,
                "only a proposed match can be answered",
            ));
        }

        let answer = Message::walk_mate(
            decision.message_kind(),
            responder_id,
            &current.conversation_id,
            match_key,
            Utc::now(),
        );
        let updated = self
            .matches
            .commit_transition(
                match_key,
                MatchStatus::Proposed,
                decision.status(),
                Some(&answer),
            )
            .await?;
        tracing::debug!(key = match_key, status = ?updated.status, "walk proposal answered");
        Ok(updated)
    }

    /// Withdraws a `Proposed` match. Only the proposer may cancel, and no
    /// chat message is emitted for the withdrawal.
    pub async fn cancel(&self, match_key: &str, caller_id: &str) -> Result<Match> {
        let current = self
            .matches
            .find_by_key(match_key)
            .await?
            .ok_or_else(|| PawmateError::not_found("match", match_key))?;

        if current.proposer_id != caller_id {
            return Err(PawmateError::unauthorized(
                caller_id,
                "cancel this walk proposal",
            ));
        }

        let updated = self
            .matches
            .commit_transition(match_key, MatchStatus::Proposed, MatchStatus::Cancelled, None)
            .await?;
        tracing::debug!(key = match_key, "walk proposal cancelled");
        Ok(updated)
    }

    /// Resolves a walk-mate message to its match for rendering.
    ///
    /// Never fails: a non-walk-mate message, a lookup miss, and a store
    /// error all yield [`ProposalDetails::Unresolved`].
    pub async fn resolve_proposal(&self, message: &Message) -> ProposalDetails {
        match message.kind {
            MessageKind::WalkMateRequest
            | MessageKind::WalkMateAccept
            | MessageKind::WalkMateReject => {}
            _ => {
                tracing::warn!(id = %message.id, kind = ?message.kind, "not a walk-mate message");
                return ProposalDetails::Unresolved;
            }
        }
        match self.matches.find_by_key(&message.content).await {
            Ok(Some(found)) => ProposalDetails::Resolved(found),
            Ok(None) => {
                tracing::debug!(key = %message.content, "walk-mate message references no match");
                ProposalDetails::Unresolved
            }
            Err(error) => {
                tracing::warn!(key = %message.content, %error, "match lookup failed");
                ProposalDetails::Unresolved
            }
        }
    }

    /// Number of accepted walks the user participates in.
    pub async fn accepted_walk_count(&self, user_id: &str) -> Result<usize> {
        self.matches.count_accepted_for_user(user_id).await
    }
}
