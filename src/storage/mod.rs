pub mod backend;
pub mod database;
pub mod store;

pub use backend::{KeyValueStore, MemoryStore};
pub use database::SqliteStore;
pub use store::{Store, THEME_KEY, TODOS_KEY};
