//! User trust records (`users` collection).

use mongodb::bson::{doc, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use crate::database::models::{StateUpdate, UserState};
use crate::database::store::{StoreError, StoreResult};
use crate::database::mongo::unique_index;
use crate::database::Database;

#[derive(Clone)]
pub struct UserStateRepository {
    collection: Collection<UserState>,
}

impl UserStateRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("users"),
        }
    }

    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        self.collection.create_index(unique_index("user_id")).await?;
        Ok(())
    }

    /// Fetch the user, inserting the default record in the same round trip.
    /// Concurrent first messages race on the upsert; the unique `user_id`
    /// index makes the server retry the loser as an update.
    pub async fn get_or_create(&self, user_id: u64) -> StoreResult<UserState> {
        let defaults = UserState::new(user_id);
        let update = doc! {
            "$setOnInsert": {
                "message_count": defaults.message_count as i64,
                "trusted": defaults.trusted,
                "profile_checked": defaults.profile_checked,
            }
        };

        self.collection
            .find_one_and_update(doc! { "user_id": user_id as i64 }, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::Malformed(format!("upsert of user {user_id} returned nothing")))
    }

    pub async fn update(&self, user_id: u64, update: &StateUpdate) -> StoreResult<()> {
        if update.is_empty() {
            self.get_or_create(user_id).await?;
            return Ok(());
        }

        let (set, set_on_insert) = split_update(update);
        let mut changes = doc! { "$set": set };
        if !set_on_insert.is_empty() {
            changes.insert("$setOnInsert", set_on_insert);
        }

        self.collection
            .update_one(doc! { "user_id": user_id as i64 }, changes)
            .upsert(true)
            .await?;

        Ok(())
    }
}

/// Set the given fields; fill the rest with defaults only when inserting.
/// A field may not appear in both operators.
fn split_update(update: &StateUpdate) -> (Document, Document) {
    let defaults = UserState::new(0);
    let mut set = Document::new();
    let mut on_insert = Document::new();

    match update.message_count {
        Some(count) => set.insert("message_count", count as i64),
        None => on_insert.insert("message_count", defaults.message_count as i64),
    };
    match update.trusted {
        Some(trusted) => set.insert("trusted", trusted),
        None => on_insert.insert("trusted", defaults.trusted),
    };
    match update.profile_checked {
        Some(checked) => set.insert("profile_checked", checked),
        None => on_insert.insert("profile_checked", defaults.profile_checked),
    };

    (set, on_insert)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_operators_disjoint() {
        let update = StateUpdate {
            message_count: Some(4),
            trusted: None,
            profile_checked: Some(true),
        };
        let (set, on_insert) = split_update(&update);

        assert_eq!(set.get_i64("message_count").unwrap(), 4);
        assert!(set.get_bool("profile_checked").unwrap());
        assert!(!set.contains_key("trusted"));

        assert!(!on_insert.get_bool("trusted").unwrap());
        assert!(!on_insert.contains_key("message_count"));
        assert!(!on_insert.contains_key("profile_checked"));
    }
}
