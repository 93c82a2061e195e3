//! Activated group records (`groups` collection).

use mongodb::bson::doc;
use mongodb::Collection;
use tracing::debug;

use crate::database::models::GroupConfig;
use crate::database::store::StoreResult;
use crate::database::mongo::unique_index;
use crate::database::Database;

/// Repository for activated groups. Reads always hit the database so that
/// `/nighton` and `/nightoff` take effect on the next message.
#[derive(Clone)]
pub struct GroupRepository {
    collection: Collection<GroupConfig>,
}

impl GroupRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("groups"),
        }
    }

    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        self.collection.create_index(unique_index("chat_id")).await?;
        Ok(())
    }

    pub async fn get(&self, chat_id: i64) -> StoreResult<Option<GroupConfig>> {
        let config = self.collection.find_one(doc! { "chat_id": chat_id }).await?;
        Ok(config)
    }

    /// Insert-if-absent. Existing groups keep their night mode setting.
    pub async fn activate(&self, chat_id: i64, added_by: u64) -> StoreResult<bool> {
        let update = doc! {
            "$setOnInsert": {
                "added_by": added_by as i64,
                "night_mode": true,
            }
        };

        let result = self
            .collection
            .update_one(doc! { "chat_id": chat_id }, update)
            .upsert(true)
            .await?;

        let created = result.upserted_id.is_some();
        debug!("Group {} activated by {} (new: {})", chat_id, added_by, created);
        Ok(created)
    }

    pub async fn set_night_mode(&self, chat_id: i64, enabled: bool) -> StoreResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "chat_id": chat_id },
                doc! { "$set": { "night_mode": enabled } },
            )
            .await?;

        Ok(result.matched_count > 0)
    }
}
