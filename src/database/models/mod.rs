//! Database model exports.

pub mod group;
pub mod user_state;

pub use group::GroupConfig;
pub use user_state::{StateUpdate, UserState, TRUST_THRESHOLD};
