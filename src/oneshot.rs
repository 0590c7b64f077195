//! `--code` mode: load the catalog, look up one code, report it.

use color_eyre::{eyre::eyre, Result};

use crate::catalog::{department, Item, LoadState, LookupService};
use crate::config::DisplayConfig;
use crate::scan::{format_price, normalize_input, search_link};
use crate::source::ItemSource;

/// Activate `lookup`, wait for both loads and describe the item for `raw`.
///
/// Fails when no list could be loaded or the code is blank. An unknown code
/// is a normal result and yields the `NO RECORD` line.
pub async fn lookup_once<S: ItemSource>(
  lookup: &mut LookupService<S>,
  raw: &str,
  display: &DisplayConfig,
) -> Result<Vec<String>> {
  let code = normalize_input(raw).ok_or_else(|| eyre!("No code given"))?;

  lookup.activate();
  lookup.settle().await;

  if let LoadState::Error(message) = lookup.state() {
    return Err(eyre!("{}", message));
  }

  Ok(match lookup.find_by_code(code) {
    Some(item) => describe(item, display),
    None => vec![format!("NO RECORD for {}", code)],
  })
}

fn describe(item: &Item, display: &DisplayConfig) -> Vec<String> {
  vec![
    format!("Description:     {}", item.description),
    format!("Department:      {}", department::label_for(&item.department)),
    format!("Sub Department:  {}", department::label_for(&item.sub_department)),
    format!(
      "SKU:             {}  {}",
      item.sku,
      search_link(&display.search_url, &item.sku)
    ),
    format!(
      "UPC:             {}  {}",
      item.upc,
      search_link(&display.search_url, &item.upc)
    ),
    format!("Price:           {}", format_price(&display.currency, item)),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::{ItemCache, NoopStorage};
  use crate::catalog::{ItemList, NetworkError};
  use reqwest::StatusCode;

  struct FixedSource(Option<ItemList>);

  impl ItemSource for FixedSource {
    async fn fetch_all(&self) -> Result<ItemList, NetworkError> {
      self
        .0
        .clone()
        .ok_or(NetworkError::Status(StatusCode::BAD_GATEWAY))
    }
  }

  fn service(items: Option<ItemList>) -> LookupService<FixedSource> {
    LookupService::new(FixedSource(items), ItemCache::new(NoopStorage))
  }

  fn widget() -> Item {
    Item {
      sku: "A1".to_string(),
      upc: "4800016644511".to_string(),
      description: "Widget".to_string(),
      department: "500".to_string(),
      sub_department: "999".to_string(),
      price: "9.99".to_string(),
    }
  }

  #[tokio::test]
  async fn test_found_prints_item() {
    let mut lookup = service(Some(vec![widget()]));
    let lines = lookup_once(&mut lookup, " 4800016644511\n", &DisplayConfig::default())
      .await
      .unwrap();

    assert_eq!(lines[0], "Description:     Widget");
    assert_eq!(lines[1], "Department:      Cleaning");
    assert_eq!(lines[2], "Sub Department:  ");
    assert!(lines[3].starts_with("SKU:             A1  "));
    assert!(lines[3].ends_with("q=A1"));
    assert!(lines[4].ends_with("q=4800016644511"));
    assert_eq!(lines[5], "Price:           ₱9.99");
  }

  #[tokio::test]
  async fn test_unknown_code_is_no_record() {
    let mut lookup = service(Some(vec![widget()]));
    let lines = lookup_once(&mut lookup, "999", &DisplayConfig::default())
      .await
      .unwrap();
    assert_eq!(lines, vec!["NO RECORD for 999".to_string()]);
  }

  #[tokio::test]
  async fn test_empty_catalog_is_no_record() {
    let mut lookup = service(Some(Vec::new()));
    let lines = lookup_once(&mut lookup, "A1", &DisplayConfig::default())
      .await
      .unwrap();
    assert_eq!(lines, vec!["NO RECORD for A1".to_string()]);
  }

  #[tokio::test]
  async fn test_load_failure_is_error() {
    let mut lookup = service(None);
    let err = lookup_once(&mut lookup, "A1", &DisplayConfig::default())
      .await
      .unwrap_err();
    assert!(err
      .to_string()
      .starts_with("Failed to load items from API or cache"));
  }

  #[tokio::test]
  async fn test_blank_code_is_error() {
    let mut lookup = service(Some(vec![widget()]));
    assert!(lookup_once(&mut lookup, "  ", &DisplayConfig::default())
      .await
      .is_err());
  }
}
