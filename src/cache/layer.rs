//! Item cache on top of a key-value store.

use std::sync::Arc;
use tracing::{debug, warn};

use super::storage::KeyValueStorage;
use crate::catalog::{Item, ItemList, StorageError};

/// Key the item list is stored under.
pub const ITEMS_KEY: &str = "itemsCache";

/// The last item list that was fetched, persisted across sessions.
///
/// Storage faults never reach the caller: a failed read is a cache miss and a
/// failed write is logged and dropped, since the in-memory list stays
/// authoritative for the session.
#[derive(Clone)]
pub struct ItemCache {
  storage: Arc<dyn KeyValueStorage>,
}

impl ItemCache {
  pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
    Self {
      storage: Arc::new(storage),
    }
  }

  /// The last stored list, or `None` if nothing usable was ever stored.
  pub fn read(&self) -> Option<ItemList> {
    let raw = match self.storage.get(ITEMS_KEY) {
      Ok(Some(raw)) => raw,
      Ok(None) => {
        debug!("No cached item list");
        return None;
      }
      Err(e) => {
        warn!(error = %e, "Failed to read item cache, treating as empty");
        return None;
      }
    };

    match serde_json::from_str::<ItemList>(&raw) {
      Ok(items) => {
        debug!(count = items.len(), "Read cached item list");
        Some(items)
      }
      Err(e) => {
        warn!(error = %e, "Cached item list is unreadable, treating as empty");
        None
      }
    }
  }

  /// Overwrite the stored list.
  pub fn replace(&self, items: &[Item]) {
    if let Err(e) = self.try_replace(items) {
      warn!(error = %e, "Failed to write item cache");
    }
  }

  fn try_replace(&self, items: &[Item]) -> Result<(), StorageError> {
    let raw = serde_json::to_string(items).map_err(StorageError::Encode)?;
    self.storage.set(ITEMS_KEY, &raw)?;
    debug!(count = items.len(), "Stored item list");
    Ok(())
  }
}
