//! Persisted item cache.
//!
//! A single JSON blob holding the last fetched item list, kept in a small
//! key-value table. There is no timestamp or expiry: whatever loaded last is
//! served until a newer fetch replaces it.

mod layer;
mod storage;

pub use layer::ItemCache;
pub use storage::{KeyValueStorage, NoopStorage, SqliteStorage};
