use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::ItemSource;
use crate::catalog::{ItemList, NetworkError};
use crate::config::SourceConfig;

/// Sheet API client
#[derive(Clone)]
pub struct HttpItemSource {
  client: reqwest::Client,
  url: Url,
}

impl HttpItemSource {
  pub fn new(config: &SourceConfig) -> Result<Self, NetworkError> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;

    Ok(Self {
      client,
      url: Url::parse(&config.url)?,
    })
  }
}

impl ItemSource for HttpItemSource {
  async fn fetch_all(&self) -> Result<ItemList, NetworkError> {
    debug!(url = %self.url, "Fetching item list");

    let response = self.client.get(self.url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(NetworkError::Status(status));
    }

    let body = response.bytes().await?;
    let items: ItemList = serde_json::from_slice(&body)?;

    info!(count = items.len(), "Fetched item list");
    Ok(items)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::io::{AsyncReadExt, AsyncWriteExt};
  use tokio::net::TcpListener;

  /// Serve one canned HTTP response on a local port and return its URL.
  async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.unwrap();
      let mut buf = [0u8; 4096];
      let _ = socket.read(&mut buf).await;
      let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
      );
      socket.write_all(response.as_bytes()).await.unwrap();
      let _ = socket.shutdown().await;
    });

    Url::parse(&format!("http://{}/api/v1/items", addr)).unwrap()
  }

  fn source_for(url: Url) -> HttpItemSource {
    HttpItemSource::new(&SourceConfig {
      url: url.to_string(),
      timeout_secs: 5,
    })
    .unwrap()
  }

  #[tokio::test]
  async fn test_fetch_all_decodes_sheet_rows() {
    let url = serve_once(
      "200 OK",
      r#"[{"SKU":"A1","UPC":"U1","Description":"Widget","Department":"500","Sub Dep":"510","Price":"9.99"},{"SKU":"B2","UPC":"U2","Description":"Gadget","Department":"110","Sub Dep":"","Price":"5"}]"#,
    )
    .await;

    let items = source_for(url).fetch_all().await.unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].sku, "A1");
    assert_eq!(items[0].price_value(), Some(9.99));
    assert_eq!(items[1].description, "Gadget");
  }

  #[tokio::test]
  async fn test_fetch_all_empty_array() {
    let url = serve_once("200 OK", "[]").await;
    let items = source_for(url).fetch_all().await.unwrap();
    assert!(items.is_empty());
  }

  #[tokio::test]
  async fn test_error_status_is_network_error() {
    let url = serve_once("503 Service Unavailable", r#"{"error":"busy"}"#).await;
    let err = source_for(url).fetch_all().await.unwrap_err();
    assert!(matches!(err, NetworkError::Status(s) if s.as_u16() == 503));
  }

  #[tokio::test]
  async fn test_non_array_body_is_network_error() {
    let url = serve_once("200 OK", r#"{"error":"Sheet not found"}"#).await;
    let err = source_for(url).fetch_all().await.unwrap_err();
    assert!(matches!(err, NetworkError::Payload(_)));
  }

  #[tokio::test]
  async fn test_unreachable_host_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{}/", addr)).unwrap();
    let err = source_for(url).fetch_all().await.unwrap_err();
    assert!(matches!(err, NetworkError::Transport(_)));
  }
}
