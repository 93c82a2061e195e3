//! MongoDB-backed [`Store`].

mod group_repository;
mod user_state_repository;

use async_trait::async_trait;
use tracing::info;

pub use group_repository::GroupRepository;
pub use user_state_repository::UserStateRepository;

use super::models::{GroupConfig, StateUpdate, UserState};
use super::store::{Store, StoreResult};
use super::Database;

/// Store that persists to the `groups` and `users` collections.
#[derive(Clone)]
pub struct MongoStore {
    groups: GroupRepository,
    users: UserStateRepository,
}

impl MongoStore {
    /// Build the store and create the unique key indexes its upserts need.
    pub async fn init(db: &Database) -> StoreResult<Self> {
        let store = Self {
            groups: GroupRepository::new(db),
            users: UserStateRepository::new(db),
        };

        futures::try_join!(store.groups.ensure_indexes(), store.users.ensure_indexes())?;
        info!("MongoDB indexes ready");

        Ok(store)
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn get_group_config(&self, chat_id: i64) -> StoreResult<Option<GroupConfig>> {
        self.groups.get(chat_id).await
    }

    async fn activate_group(&self, chat_id: i64, added_by: u64) -> StoreResult<bool> {
        self.groups.activate(chat_id, added_by).await
    }

    async fn set_night_mode(&self, chat_id: i64, enabled: bool) -> StoreResult<bool> {
        self.groups.set_night_mode(chat_id, enabled).await
    }

    async fn get_user_state(&self, user_id: u64) -> StoreResult<UserState> {
        self.users.get_or_create(user_id).await
    }

    async fn update_user_state(&self, user_id: u64, update: &StateUpdate) -> StoreResult<()> {
        self.users.update(user_id, update).await
    }
}
