//! Match repository trait.
//!
//! Defines the interface for match persistence. The state machine in
//! [`super::machine`] is the only component that calls the mutating
//! operations; nothing else writes `Match.status`.

use super::model::{Match, MatchStatus, ParticipantPair};
use crate::chat::Message;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the match collection of the backing store.
///
/// # Implementation Notes
///
/// Implementations must provide two atomicity guarantees:
/// - `insert_proposal` enforces the one-`Proposed`-match-per-pair invariant
///   under the same critical section that inserts, so two racing proposals
///   cannot both succeed.
/// - `commit_transition` compare-and-swaps the status and appends the
///   accompanying message in one step; concurrent transitions on the same
///   key are linearized and the losers observe the swapped status.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Finds a match by its key.
    async fn find_by_key(&self, key: &str) -> Result<Option<Match>>;

    /// Finds the `Proposed` match for an unordered pair, if one exists.
    async fn find_proposed_for_pair(&self, pair: &ParticipantPair) -> Result<Option<Match>>;

    /// Inserts a new `Proposed` match together with its request message.
    ///
    /// Fails with `DuplicateProposal` if a `Proposed` match already exists
    /// for the pair; neither document is written in that case.
    async fn insert_proposal(&self, proposal: &Match, request: &Message) -> Result<()>;

    /// Atomically advances `key` from `expected` to `next`, appending
    /// `message` (when given) in the same step, and returns the updated
    /// match.
    ///
    /// Fails with `NotFound` when the key does not resolve and with
    /// `InvalidTransition` when the current status is not `expected`; no
    /// write happens on failure.
    async fn commit_transition(
        &self,
        key: &str,
        expected: MatchStatus,
        next: MatchStatus,
        message: Option<&Message>,
    ) -> Result<Match>;

    /// Number of `Accepted` matches the user participates in.
    async fn count_accepted_for_user(&self, user_id: &str) -> Result<usize>;
}
