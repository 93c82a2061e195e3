//! Per-user trust record.
//!
//! Created lazily the first time a user is seen. Mutated through
//! [`StateUpdate`] after each scanned message, never cached in-process.

use serde::{Deserialize, Serialize};

/// Message count a user needs on clean messages to become trusted.
pub const TRUST_THRESHOLD: u32 = 10;

/// Message count granted by an admin unban.
pub const UNBAN_MESSAGE_COUNT: u32 = 100;

/// Trust tracking state for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserState {
    /// Telegram user ID
    pub user_id: u64,

    /// Messages that passed (or skipped) the scan
    #[serde(default)]
    pub message_count: u32,

    /// Trusted users skip the scan except for random audits
    #[serde(default)]
    pub trusted: bool,

    /// Avatar/bio audit already performed
    #[serde(default)]
    pub profile_checked: bool,
}

impl UserState {
    /// Default state for a user seen for the first time.
    pub fn new(user_id: u64) -> Self {
        Self {
            user_id,
            message_count: 0,
            trusted: false,
            profile_checked: false,
        }
    }

    /// State forced by an admin unban.
    pub fn unbanned(user_id: u64) -> Self {
        Self {
            user_id,
            message_count: UNBAN_MESSAGE_COUNT,
            trusted: true,
            profile_checked: true,
        }
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &StateUpdate) {
        if let Some(count) = update.message_count {
            self.message_count = count;
        }
        if let Some(trusted) = update.trusted {
            self.trusted = trusted;
        }
        if let Some(checked) = update.profile_checked {
            self.profile_checked = checked;
        }
    }
}

/// Partial write-back of a [`UserState`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    pub message_count: Option<u32>,
    pub trusted: Option<bool>,
    pub profile_checked: Option<bool>,
}

impl StateUpdate {
    /// True when nothing would be written.
    pub fn is_empty(&self) -> bool {
        self.message_count.is_none() && self.trusted.is_none() && self.profile_checked.is_none()
    }

    /// Merge `other` on top of `self`; set fields in `other` win.
    pub fn merge(mut self, other: StateUpdate) -> Self {
        if other.message_count.is_some() {
            self.message_count = other.message_count;
        }
        if other.trusted.is_some() {
            self.trusted = other.trusted;
        }
        if other.profile_checked.is_some() {
            self.profile_checked = other.profile_checked;
        }
        self
    }
}
