//! Item records as served by the sheet endpoint and stored in the cache.
//!
//! Spreadsheet APIs hand every cell back as a string, and nothing stops a
//! cell from holding a number or junk. Cells are decoded leniently into text
//! so one odd row never rejects the list. Items serialize back with the same
//! field names, which keeps the cached blob readable by the same decoder.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// A single catalog row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
  #[serde(rename = "SKU", default, deserialize_with = "cell_string")]
  pub sku: String,
  #[serde(rename = "UPC", default, deserialize_with = "cell_string")]
  pub upc: String,
  #[serde(rename = "Description", default, deserialize_with = "cell_string")]
  pub description: String,
  #[serde(rename = "Department", default, deserialize_with = "cell_string")]
  pub department: String,
  #[serde(rename = "Sub Dep", default, deserialize_with = "cell_string")]
  pub sub_department: String,
  /// Price cell as the sheet holds it, see [`Item::price_value`]
  #[serde(rename = "Price", default, deserialize_with = "cell_string")]
  pub price: String,
}

/// Items in the order the source returned them.
pub type ItemList = Vec<Item>;

impl Item {
  /// Numeric price, or `None` when the cell is blank or not a number.
  ///
  /// Currency signs and thousands separators are ignored.
  pub fn price_value(&self) -> Option<f64> {
    let cleaned: String = self
      .price
      .chars()
      .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
      .collect();
    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
      return None;
    }
    cleaned.parse().ok().filter(|v: &f64| v.is_finite())
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
  Str(String),
  Int(i64),
  Float(f64),
  Null(()),
  // Booleans, arrays, objects
  Other(IgnoredAny),
}

fn cell_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Cell::deserialize(deserializer)? {
    Cell::Str(s) => s,
    Cell::Int(n) => n.to_string(),
    Cell::Float(f) => f.to_string(),
    Cell::Null(()) | Cell::Other(_) => String::new(),
  })
}
