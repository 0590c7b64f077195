use std::collections::HashMap;
use tracing::debug;

use super::types::{Item, ItemList};

/// The active item list plus a code index over it.
///
/// Both SKU and UPC map into one table. Codes are inserted in list order and
/// never overwritten, so a lookup returns the same item a front-to-back scan
/// matching either field would.
#[derive(Debug, Default)]
pub struct ItemIndex {
  items: ItemList,
  by_code: HashMap<String, usize>,
}

impl ItemIndex {
  pub fn new(items: ItemList) -> Self {
    let mut by_code = HashMap::with_capacity(items.len() * 2);
    let mut shadowed = 0usize;

    for (position, item) in items.iter().enumerate() {
      for code in [&item.sku, &item.upc] {
        if code.is_empty() {
          continue;
        }
        match by_code.get(code.as_str()).copied() {
          Some(first) if first != position => shadowed += 1,
          Some(_) => {}
          None => {
            by_code.insert(code.clone(), position);
          }
        }
      }
    }

    if shadowed > 0 {
      debug!(shadowed, "Duplicate codes in item list, first occurrence wins");
    }

    Self { items, by_code }
  }

  /// Find an item by SKU or UPC. Blank codes never match.
  pub fn find(&self, code: &str) -> Option<&Item> {
    if code.is_empty() {
      return None;
    }
    self.by_code.get(code).map(|&i| &self.items[i])
  }

  pub fn items(&self) -> &[Item] {
    &self.items
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }
}
