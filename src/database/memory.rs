//! In-memory store used when no MongoDB URI is configured, and in tests.

use async_trait::async_trait;
use dashmap::DashMap;

use super::models::{GroupConfig, StateUpdate, UserState};
use super::store::{Store, StoreResult};

#[derive(Default)]
pub struct MemoryStore {
    groups: DashMap<i64, GroupConfig>,
    users: DashMap<u64, UserState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a group directly.
    #[cfg(test)]
    pub fn insert_group(&self, config: GroupConfig) {
        self.groups.insert(config.chat_id, config);
    }

    /// Seed a user directly.
    #[cfg(test)]
    pub fn insert_user(&self, state: UserState) {
        self.users.insert(state.user_id, state);
    }

    /// Peek at a user without creating the record.
    #[cfg(test)]
    pub fn user(&self, user_id: u64) -> Option<UserState> {
        self.users.get(&user_id).map(|s| s.clone())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_group_config(&self, chat_id: i64) -> StoreResult<Option<GroupConfig>> {
        Ok(self.groups.get(&chat_id).map(|g| g.clone()))
    }

    async fn activate_group(&self, chat_id: i64, added_by: u64) -> StoreResult<bool> {
        let mut created = false;
        self.groups.entry(chat_id).or_insert_with(|| {
            created = true;
            GroupConfig::activated(chat_id, added_by)
        });
        Ok(created)
    }

    async fn set_night_mode(&self, chat_id: i64, enabled: bool) -> StoreResult<bool> {
        match self.groups.get_mut(&chat_id) {
            Some(mut group) => {
                group.night_mode = enabled;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_user_state(&self, user_id: u64) -> StoreResult<UserState> {
        let state = self
            .users
            .entry(user_id)
            .or_insert_with(|| UserState::new(user_id));
        Ok(state.clone())
    }

    async fn update_user_state(&self, user_id: u64, update: &StateUpdate) -> StoreResult<()> {
        self.users
            .entry(user_id)
            .or_insert_with(|| UserState::new(user_id))
            .apply(update);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_group_is_absent() {
        let store = MemoryStore::new();
        assert!(store.get_group_config(-100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn activate_group_defaults_night_mode_on() {
        let store = MemoryStore::new();
        assert!(store.activate_group(-100, 7).await.unwrap());
        assert!(!store.activate_group(-100, 8).await.unwrap());

        let group = store.get_group_config(-100).await.unwrap().unwrap();
        assert!(group.night_mode);
        assert_eq!(group.added_by, Some(7));
    }

    #[tokio::test]
    async fn night_mode_requires_activated_group() {
        let store = MemoryStore::new();
        assert!(!store.set_night_mode(-5, false).await.unwrap());

        store.activate_group(-5, 1).await.unwrap();
        assert!(store.set_night_mode(-5, false).await.unwrap());
        assert!(!store.get_group_config(-5).await.unwrap().unwrap().night_mode);
    }

    #[tokio::test]
    async fn first_lookup_creates_default_state() {
        let store = MemoryStore::new();
        let state = store.get_user_state(42).await.unwrap();
        assert_eq!(state, UserState::new(42));
        assert_eq!(store.user(42), Some(UserState::new(42)));
    }

    #[tokio::test]
    async fn partial_update_keeps_other_fields() {
        let store = MemoryStore::new();
        store.set_profile_checked(9).await.unwrap();
        store
            .update_user_state(
                9,
                &StateUpdate {
                    message_count: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let state = store.get_user_state(9).await.unwrap();
        assert_eq!(state.message_count, 3);
        assert!(state.profile_checked);
        assert!(!state.trusted);
    }

    #[tokio::test]
    async fn trust_and_reset() {
        let store = MemoryStore::new();
        store.set_trust(11).await.unwrap();
        assert_eq!(store.get_user_state(11).await.unwrap(), UserState::unbanned(11));

        store.reset_user(11).await.unwrap();
        assert_eq!(store.get_user_state(11).await.unwrap(), UserState::new(11));
    }
}
