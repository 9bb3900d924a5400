//! Match domain module.
//!
//! - `model`: match entity, participant pair, status machine states
//! - `repository`: persistence trait with the atomic commit operations
//! - `machine`: the state machine driving all status transitions

mod machine;
mod model;
mod repository;

pub use machine::{MatchStateMachine, ProposalDetails};
pub use model::{Match, MatchStatus, ParticipantPair, WalkDecision};
pub use repository::MatchRepository;
