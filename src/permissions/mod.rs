//! Bot-level admin identity.
//!
//! Admins come from `ADMIN_IDS`. They are exempt from moderation in every
//! chat and are the only users allowed to run commands.

use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Permissions {
    admin_ids: Arc<HashSet<u64>>,
}

impl Permissions {
    pub fn new(admin_ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            admin_ids: Arc::new(admin_ids.into_iter().collect()),
        }
    }

    #[inline]
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    pub fn is_empty(&self) -> bool {
        self.admin_ids.is_empty()
    }
}
