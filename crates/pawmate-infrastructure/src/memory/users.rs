//! UserRepository implementation.

use super::InMemoryStore;
use async_trait::async_trait;
use pawmate_core::error::{PawmateError, Result};
use pawmate_core::user::{Position, UserProfile, UserRepository};

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let inner = self.lock_inner().lock().await;
        Ok(inner.users.get(user_id).map(UserProfile::from))
    }

    async fn nickname(&self, user_id: &str) -> Result<Option<String>> {
        let inner = self.lock_inner().lock().await;
        Ok(inner.users.get(user_id).map(|u| u.nickname.clone()))
    }

    async fn set_on_walk(&self, user_id: &str, position: Position) -> Result<()> {
        let mut inner = self.lock_inner().lock().await;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| PawmateError::not_found("user", user_id))?;
        user.on_walk = true;
        user.latitude = Some(position.latitude);
        user.longitude = Some(position.longitude);
        inner.publish_users_on_walk();
        Ok(())
    }

    async fn clear_on_walk(&self, user_id: &str) -> Result<()> {
        let mut inner = self.lock_inner().lock().await;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| PawmateError::not_found("user", user_id))?;
        user.on_walk = false;
        inner.publish_users_on_walk();
        Ok(())
    }

    async fn block_user(&self, user_id: &str, blocked_id: &str) -> Result<()> {
        let mut inner = self.lock_inner().lock().await;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or_else(|| PawmateError::not_found("user", user_id))?;
        if !user.blocked.iter().any(|b| b == blocked_id) {
            user.blocked.push(blocked_id.to_string());
        }
        Ok(())
    }
}
