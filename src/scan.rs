//! What the scanner screen is showing, driven by lookup results.

use url::form_urlencoded;

use crate::catalog::Item;

/// Result of the last submitted code.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScanState {
  /// Waiting for a code
  #[default]
  Idle,
  /// The code matched an item
  Found(Item),
  /// The code matched nothing
  NotFound(String),
}

impl ScanState {
  /// Screen state after looking up `code`.
  pub fn resolve(code: &str, found: Option<&Item>) -> Self {
    match found {
      Some(item) => ScanState::Found(item.clone()),
      None => ScanState::NotFound(code.to_string()),
    }
  }

  pub fn item(&self) -> Option<&Item> {
    match self {
      ScanState::Found(item) => Some(item),
      _ => None,
    }
  }
}

/// Normalize raw scanner or keyboard input into a lookup code.
///
/// Returns `None` for blank input, which is ignored rather than looked up.
pub fn normalize_input(raw: &str) -> Option<&str> {
  let code = raw.trim();
  (!code.is_empty()).then_some(code)
}

/// Image search link for a product code.
pub fn search_link(template: &str, code: &str) -> String {
  let encoded: String = form_urlencoded::byte_serialize(code.as_bytes()).collect();
  template.replace("{code}", &encoded)
}

/// Price with currency symbol and two decimals.
///
/// A cell that is not a number is shown as written and a blank cell as
/// nothing, never as a zero price.
pub fn format_price(currency: &str, item: &Item) -> String {
  match item.price_value() {
    Some(price) => format!("{}{:.2}", currency, price),
    None => item.price.trim().to_string(),
  }
}
