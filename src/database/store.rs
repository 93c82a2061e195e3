//! Persistence port for group configuration and user trust state.
//!
//! The moderation flow only talks to [`Store`]; MongoDB and the in-memory
//! map are interchangeable behind it.

use async_trait::async_trait;
use thiserror::Error;

use super::models::{GroupConfig, StateUpdate, UserState};

/// Storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("stored document is malformed: {0}")]
    Malformed(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Config of an activated group, `None` when the chat was never activated.
    async fn get_group_config(&self, chat_id: i64) -> StoreResult<Option<GroupConfig>>;

    /// Activate moderation for a chat. Returns `true` when the group was newly created.
    async fn activate_group(&self, chat_id: i64, added_by: u64) -> StoreResult<bool>;

    /// Toggle night mode. Returns `false` when the group is not activated.
    async fn set_night_mode(&self, chat_id: i64, enabled: bool) -> StoreResult<bool>;

    /// Load a user's state, atomically creating the default record if absent.
    async fn get_user_state(&self, user_id: u64) -> StoreResult<UserState>;

    /// Persist a partial update. Creates the record first if needed.
    async fn update_user_state(&self, user_id: u64, update: &StateUpdate) -> StoreResult<()>;

    async fn set_profile_checked(&self, user_id: u64) -> StoreResult<()> {
        let update = StateUpdate {
            profile_checked: Some(true),
            ..Default::default()
        };
        self.update_user_state(user_id, &update).await
    }

    /// Force a user into the trusted state (admin unban).
    async fn set_trust(&self, user_id: u64) -> StoreResult<()> {
        let state = UserState::unbanned(user_id);
        let update = StateUpdate {
            message_count: Some(state.message_count),
            trusted: Some(state.trusted),
            profile_checked: Some(state.profile_checked),
        };
        self.update_user_state(user_id, &update).await
    }

    /// Reset a user back to the new-user state.
    async fn reset_user(&self, user_id: u64) -> StoreResult<()> {
        let update = StateUpdate {
            message_count: Some(0),
            trusted: Some(false),
            profile_checked: Some(false),
        };
        self.update_user_state(user_id, &update).await
    }
}
