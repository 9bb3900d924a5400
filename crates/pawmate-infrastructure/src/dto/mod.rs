//! Wire document types.
//!
//! The backing store keeps these DTOs, not the domain models; conversion
//! happens at the repository boundary so protocol violations (unknown
//! message-kind tags, unknown status codes, out-of-range timestamps) are
//! caught at decode time instead of leaking into the domain.

pub mod matching;
pub mod message;
pub mod place;
pub mod user;

pub use matching::MatchDocument;
pub use message::MessageDocument;
pub use place::{FavoriteDocument, ReviewDocument};
pub use user::UserDocument;
