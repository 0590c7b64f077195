//! Where the authoritative item list comes from.

mod client;

pub use client::HttpItemSource;

use std::future::Future;

use crate::catalog::{ItemList, NetworkError};

/// A remote that can hand over the full item list in one request.
pub trait ItemSource: Send + Sync + 'static {
  fn fetch_all(&self) -> impl Future<Output = Result<ItemList, NetworkError>> + Send;
}
