//! Key-value storage trait and SQLite implementation.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

use crate::catalog::StorageError;

/// Trait for persisted key-value backends.
pub trait KeyValueStorage: Send + Sync {
  /// Get the value stored under `key`, if any.
  fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Storage implementation that doesn't keep anything.
/// Used when caching is disabled.
pub struct NoopStorage;

impl KeyValueStorage for NoopStorage {
  fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
    Ok(None) // Always miss
  }

  fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
    Ok(()) // Discard
  }
}

/// SQLite-based key-value storage.
pub struct SqliteStorage {
  conn: Mutex<Connection>,
}

/// Schema for the key-value table.
const CACHE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_cache (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

impl SqliteStorage {
  /// Open or create the cache database at `path`.
  pub fn open(path: &Path) -> Result<Self, StorageError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).map_err(|source| StorageError::Directory {
        path: parent.display().to_string(),
        source,
      })?;
    }

    Self::with_connection(Connection::open(path)?)
  }

  /// Open a private in-memory database.
  #[cfg(test)]
  pub fn open_in_memory() -> Result<Self, StorageError> {
    Self::with_connection(Connection::open_in_memory()?)
  }

  fn with_connection(conn: Connection) -> Result<Self, StorageError> {
    conn.execute_batch(CACHE_SCHEMA)?;
    Ok(Self {
      conn: Mutex::new(conn),
    })
  }
}

impl KeyValueStorage for SqliteStorage {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;

    let value = conn
      .query_row(
        "SELECT value FROM kv_cache WHERE key = ?",
        params![key],
        |row| row.get(0),
      )
      .optional()?;

    Ok(value)
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
    let conn = self.conn.lock().map_err(|_| StorageError::Poisoned)?;

    // A single statement, so readers see either the old or the new value
    conn.execute(
      "INSERT OR REPLACE INTO kv_cache (key, value) VALUES (?, ?)",
      params![key, value],
    )?;

    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_get_missing_key() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    assert_eq!(storage.get("itemsCache").unwrap(), None);
  }

  #[test]
  fn test_set_then_get() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("itemsCache", "[1]").unwrap();
    assert_eq!(storage.get("itemsCache").unwrap().as_deref(), Some("[1]"));
  }

  #[test]
  fn test_set_overwrites() {
    let storage = SqliteStorage::open_in_memory().unwrap();
    storage.set("k", "old").unwrap();
    storage.set("k", "new").unwrap();
    storage.set("other", "x").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("new"));
    assert_eq!(storage.get("other").unwrap().as_deref(), Some("x"));
  }

  #[test]
  fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache.db");

    SqliteStorage::open(&path).unwrap().set("k", "v").unwrap();

    let reopened = SqliteStorage::open(&path).unwrap();
    assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
  }

  #[test]
  fn test_noop_storage_always_misses() {
    let storage = NoopStorage;
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
  }
}
