//! Cache module - named Moka caches.
//!
//! Only data that is not a per-user or per-group record belongs here;
//! group configs and user states are always read fresh from the store.

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
