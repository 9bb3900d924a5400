//! Wire format of match documents.

use super::message::timestamp_from_ms;
use pawmate_core::error::{PawmateError, Result};
use pawmate_core::matching::{Match, MatchStatus, ParticipantPair};
use serde::{Deserialize, Serialize};

const STATUS_PROPOSED: &str = "proposed";
const STATUS_ACCEPTED: &str = "accepted";
const STATUS_REJECTED: &str = "rejected";
const STATUS_CANCELLED: &str = "cancelled";

pub fn status_code(status: MatchStatus) -> &'static str {
    match status {
        MatchStatus::Proposed => STATUS_PROPOSED,
        MatchStatus::Accepted => STATUS_ACCEPTED,
        MatchStatus::Rejected => STATUS_REJECTED,
        MatchStatus::Cancelled => STATUS_CANCELLED,
    }
}

pub fn status_from_code(code: &str) -> Result<MatchStatus> {
    match code {
        STATUS_PROPOSED => Ok(MatchStatus::Proposed),
        STATUS_ACCEPTED => Ok(MatchStatus::Accepted),
        STATUS_REJECTED => Ok(MatchStatus::Rejected),
        STATUS_CANCELLED => Ok(MatchStatus::Cancelled),
        other => Err(PawmateError::Serialization {
            format: "document".to_string(),
            message: format!("unknown match status '{other}'"),
        }),
    }
}

/// One match document as the store keeps it. Participants are stored in
/// normalized order, matching [`ParticipantPair`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchDocument {
    pub key: String,
    pub user_a: String,
    pub user_b: String,
    pub proposer_id: String,
    pub conversation_id: String,
    pub status: String,
    pub walk_at_ms: i64,
}

impl MatchDocument {
    pub fn from_domain(walk_match: &Match) -> Self {
        Self {
            key: walk_match.key.clone(),
            user_a: walk_match.participants.first().to_string(),
            user_b: walk_match.participants.second().to_string(),
            proposer_id: walk_match.proposer_id.clone(),
            conversation_id: walk_match.conversation_id.clone(),
            status: status_code(walk_match.status).to_string(),
            walk_at_ms: walk_match.walk_at.timestamp_millis(),
        }
    }
}

impl TryFrom<&MatchDocument> for Match {
    type Error = PawmateError;

    fn try_from(document: &MatchDocument) -> Result<Self> {
        Ok(Match {
            key: document.key.clone(),
            participants: ParticipantPair::new(&document.user_a, &document.user_b),
            proposer_id: document.proposer_id.clone(),
            conversation_id: document.conversation_id.clone(),
            status: status_from_code(&document.status)?,
            walk_at: timestamp_from_ms(document.walk_at_ms, "walk_at_ms")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_status_codes_round_trip() {
        for status in [
            MatchStatus::Proposed,
            MatchStatus::Accepted,
            MatchStatus::Rejected,
            MatchStatus::Cancelled,
        ] {
            assert_eq!(status_from_code(status_code(status)).unwrap(), status);
        }
        assert!(status_from_code("paused").is_err());
    }

    #[test]
    fn test_document_round_trip() {
        let walk_match = Match {
            key: "match-1".to_string(),
            participants: ParticipantPair::new("bob", "alice"),
            proposer_id: "bob".to_string(),
            conversation_id: "conv-1".to_string(),
            status: MatchStatus::Proposed,
            walk_at: Utc::now(),
        };
        let decoded = Match::try_from(&MatchDocument::from_domain(&walk_match)).unwrap();
        assert_eq!(decoded.key, walk_match.key);
        assert_eq!(decoded.participants, walk_match.participants);
        assert_eq!(decoded.status, MatchStatus::Proposed);
    }
}
