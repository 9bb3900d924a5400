//! User repository trait.

use super::model::{Position, UserProfile};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for the user collection of the backing store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// The user's display nickname, if the user exists.
    async fn nickname(&self, user_id: &str) -> Result<Option<String>>;

    /// Flags the user as on-walk at the given position.
    ///
    /// Fails with `NotFound` for an unknown user.
    async fn set_on_walk(&self, user_id: &str, position: Position) -> Result<()>;

    /// Clears the on-walk flag.
    async fn clear_on_walk(&self, user_id: &str) -> Result<()>;

    /// Adds `blocked_id` to the user's block list. Re-blocking is a no-op.
    async fn block_user(&self, user_id: &str, blocked_id: &str) -> Result<()>;
}
