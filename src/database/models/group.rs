//! Activated group configuration.
//!
//! A group only exists in storage once an admin has run `/addgroup` in it.
//! Absence of a record means moderation is inactive for that chat.

use serde::{Deserialize, Serialize};

/// Per-group moderation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Telegram chat ID
    pub chat_id: i64,

    /// Admin who activated the group
    #[serde(default)]
    pub added_by: Option<u64>,

    /// Delete every non-admin message during night hours
    #[serde(default)]
    pub night_mode: bool,
}

impl GroupConfig {
    /// Config for a freshly activated group. Night mode starts enabled.
    pub fn activated(chat_id: i64, added_by: u64) -> Self {
        Self {
            chat_id,
            added_by: Some(added_by),
            night_mode: true,
        }
    }
}
