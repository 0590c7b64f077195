//! Code lookup over the active item list.
//!
//! On activation the service reads the persisted list and fetches a fresh one
//! concurrently. Both results come back over a channel and are applied on the
//! caller's loop via `poll()` (or awaited with `settle()`), so the list is only
//! ever written from the same place it is read.
//!
//! Ordering between the two loads is not guaranteed. The active list carries
//! its provenance and a cached list is never applied over a network one.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::index::ItemIndex;
use super::types::{Item, ItemList};
use super::NetworkError;
use crate::cache::ItemCache;
use crate::source::ItemSource;

/// Lifecycle of the active list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
  /// Waiting for the first usable list
  Loading,
  /// Queries are served (the list may still be empty if nothing was ever loaded)
  Ready,
  /// Neither cache nor network produced a list
  Error(String),
}

/// Where the active list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
  Cache,
  Network,
}

/// Completion of one of the background loads.
#[derive(Debug)]
pub enum RefreshEvent {
  CacheRead(Option<ItemList>),
  Fetched(Result<ItemList, NetworkError>),
}

pub struct LookupService<S> {
  source: Arc<S>,
  cache: ItemCache,
  /// Whether activation fetches from the source at all
  refresh: bool,

  index: ItemIndex,
  provenance: Option<Provenance>,
  state: LoadState,

  receiver: Option<mpsc::UnboundedReceiver<RefreshEvent>>,
  cache_pending: bool,
  fetch_pending: bool,
  /// Fetch failure held until the cache read resolves
  fetch_error: Option<NetworkError>,
  /// User-facing message, handed out once
  notice: Option<String>,
}

impl<S: ItemSource> LookupService<S> {
  pub fn new(source: S, cache: ItemCache) -> Self {
    Self {
      source: Arc::new(source),
      cache,
      refresh: true,
      index: ItemIndex::default(),
      provenance: None,
      state: LoadState::Loading,
      receiver: None,
      cache_pending: false,
      fetch_pending: false,
      fetch_error: None,
      notice: None,
    }
  }

  /// Serve the cached list only, never contacting the source.
  pub fn without_refresh(mut self) -> Self {
    self.refresh = false;
    self
  }

  /// Start the cache read and the network refresh.
  ///
  /// Must be called from within a tokio runtime. A refresh that is still in
  /// flight when the service is dropped runs to completion; its cache write
  /// still lands, its result is discarded.
  pub fn activate(&mut self) {
    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.state = LoadState::Loading;
    self.fetch_error = None;

    self.cache_pending = true;
    let cache = self.cache.clone();
    let cache_tx = tx.clone();
    tokio::task::spawn_blocking(move || {
      // Ignore send errors - the service may be gone
      let _ = cache_tx.send(RefreshEvent::CacheRead(cache.read()));
    });

    if !self.refresh {
      debug!("Refresh disabled, serving cache only");
      return;
    }

    self.fetch_pending = true;
    let source = Arc::clone(&self.source);
    let cache = self.cache.clone();
    tokio::spawn(async move {
      let result = source.fetch_all().await;
      if let Ok(items) = &result {
        if !items.is_empty() {
          cache.replace(items);
        }
      }
      let _ = tx.send(RefreshEvent::Fetched(result));
    });
  }

  /// Apply any finished loads without waiting.
  ///
  /// Returns `true` if anything was applied. Call this from the event loop tick.
  pub fn poll(&mut self) -> bool {
    let mut changed = false;

    while let Some(receiver) = self.receiver.as_mut() {
      match receiver.try_recv() {
        Ok(event) => {
          self.apply(event);
          changed = true;
        }
        Err(mpsc::error::TryRecvError::Empty) => break,
        Err(mpsc::error::TryRecvError::Disconnected) => {
          self.abandon_pending();
          changed = true;
        }
      }
    }

    changed
  }

  /// Wait until both loads have been applied.
  pub async fn settle(&mut self) {
    while self.is_refreshing() {
      let Some(receiver) = self.receiver.as_mut() else {
        break;
      };
      match receiver.recv().await {
        Some(event) => self.apply(event),
        None => self.abandon_pending(),
      }
    }
  }
}

impl<S> LookupService<S> {
  /// Find an item by SKU or UPC in the active list.
  ///
  /// Blank codes never match. On duplicate codes the earliest item wins.
  pub fn find_by_code(&self, code: &str) -> Option<&Item> {
    self.index.find(code)
  }

  pub fn state(&self) -> &LoadState {
    &self.state
  }

  pub fn provenance(&self) -> Option<Provenance> {
    self.provenance
  }

  pub fn items(&self) -> &[Item] {
    self.index.items()
  }

  /// Whether either background load is still outstanding.
  pub fn is_refreshing(&self) -> bool {
    self.cache_pending || self.fetch_pending
  }

  /// Take the pending user-facing notice, if any.
  pub fn take_notice(&mut self) -> Option<String> {
    self.notice.take()
  }

  /// Apply the result of one background load.
  pub fn apply(&mut self, event: RefreshEvent) {
    match event {
      RefreshEvent::CacheRead(items) => {
        self.cache_pending = false;
        match items {
          Some(items) if !items.is_empty() => {
            if self.provenance == Some(Provenance::Network) {
              debug!("Network list already active, dropping cached list");
            } else {
              info!(count = items.len(), "Serving cached item list");
              self.install(items, Provenance::Cache);
            }
          }
          _ => debug!("Nothing cached"),
        }
      }
      RefreshEvent::Fetched(Ok(items)) => {
        self.fetch_pending = false;
        if items.is_empty() {
          info!("Source returned no items, keeping current list");
        } else {
          self.install(items, Provenance::Network);
        }
      }
      RefreshEvent::Fetched(Err(e)) => {
        self.fetch_pending = false;
        warn!(error = %e, "Item refresh failed");
        self.fetch_error = Some(e);
      }
    }

    self.resolve_state();
  }

  fn install(&mut self, items: ItemList, provenance: Provenance) {
    self.index = ItemIndex::new(items);
    self.provenance = Some(provenance);
    self.state = LoadState::Ready;
  }

  /// Settle the state once the cache read is known.
  fn resolve_state(&mut self) {
    // A failed fetch only matters if the cache has nothing either
    if self.cache_pending {
      return;
    }

    let failure = self.fetch_error.take();
    if !self.index.is_empty() {
      return;
    }

    match failure {
      Some(e) => {
        let message = format!("Failed to load items from API or cache: {}", e);
        self.notice = Some(message.clone());
        self.state = LoadState::Error(message);
      }
      None if !self.fetch_pending && self.state == LoadState::Loading => {
        info!("No items available, catalog is empty");
        self.state = LoadState::Ready;
      }
      None => {}
    }
  }

  /// The channel closed with loads outstanding (a load task panicked).
  fn abandon_pending(&mut self) {
    self.receiver = None;
    if self.cache_pending || self.fetch_pending {
      warn!("Background load ended without a result");
      self.cache_pending = false;
      self.fetch_pending = false;
      self.resolve_state();
    }
  }
}
