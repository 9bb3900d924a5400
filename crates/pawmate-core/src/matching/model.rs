//! Walk-mate match domain model.

use crate::chat::MessageKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unordered pair of user ids.
///
/// Construction normalizes the order so `(a, b)` and `(b, a)` compare and
/// hash equal, which is what the single-proposal-per-pair invariant keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantPair {
    first: String,
    second: String,
}

impl ParticipantPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.first == user_id || self.second == user_id
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

/// Lifecycle state of a match.
///
/// `Proposed` is the only non-terminal state: it may advance to `Accepted`
/// or `Rejected` (by the invitee) or `Cancelled` (by the proposer). The
/// other three states have no outgoing transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Proposed,
    Accepted,
    Rejected,
    Cancelled,
}

impl MatchStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Proposed)
    }
}

/// The invitee's answer to a walk proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkDecision {
    Accept,
    Reject,
}

impl WalkDecision {
    /// The terminal status this decision advances the match to.
    pub fn status(self) -> MatchStatus {
        match self {
            Self::Accept => MatchStatus::Accepted,
            Self::Reject => MatchStatus::Rejected,
        }
    }

    /// The chat message kind emitted alongside the transition.
    pub fn message_kind(self) -> MessageKind {
        match self {
            Self::Accept => MessageKind::WalkMateAccept,
            Self::Reject => MessageKind::WalkMateReject,
        }
    }
}

/// A proposed or concluded walk pairing between exactly two users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Stable identifier, referenced by walk-mate messages through their
    /// `content` field.
    pub key: String,
    pub participants: ParticipantPair,
    /// The participant who issued the proposal.
    pub proposer_id: String,
    /// The shared conversation walk-mate messages are emitted into.
    pub conversation_id: String,
    pub status: MatchStatus,
    /// Proposed (and, once accepted, confirmed) walk start time.
    pub walk_at: DateTime<Utc>,
}

impl Match {
    pub fn is_participant(&self, user_id: &str) -> bool {
        self.participants.contains(user_id)
    }
}
