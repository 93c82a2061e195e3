//! Database module exports.

mod memory;
mod models;
mod mongo;
mod repository;
pub mod store;

pub use memory::MemoryStore;
pub use models::*;
pub use mongo::Database;
pub use repository::MongoStore;
pub use store::Store;
