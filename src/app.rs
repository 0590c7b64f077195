use crate::cache::{ItemCache, NoopStorage, SqliteStorage};
use crate::catalog::LookupService;
use crate::config::{Config, DisplayConfig};
use crate::event::{Event, EventHandler};
use crate::scan::{normalize_input, ScanState};
use crate::source::{HttpItemSource, ItemSource};
use crate::ui;
use crate::ui::components::{CodeInput, InputResult};
use color_eyre::{eyre::eyre, Result};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
  disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use std::io::{stdout, Stdout};
use std::time::Duration;
use tracing::{info, warn};

/// Build the lookup service from configuration.
///
/// A cache that cannot be opened is not fatal, the session runs without one.
pub fn build_lookup(config: &Config, offline: bool) -> Result<LookupService<HttpItemSource>> {
  let source = HttpItemSource::new(&config.source)
    .map_err(|e| eyre!("Failed to create item source: {}", e))?;

  let cache = if config.cache.enabled {
    let path = config.cache_path()?;
    match SqliteStorage::open(&path) {
      Ok(storage) => ItemCache::new(storage),
      Err(e) => {
        warn!(error = %e, path = %path.display(), "Cache unavailable, continuing without it");
        ItemCache::new(NoopStorage)
      }
    }
  } else {
    ItemCache::new(NoopStorage)
  };

  let lookup = LookupService::new(source, cache);
  Ok(if offline {
    lookup.without_refresh()
  } else {
    lookup
  })
}

/// Scanner screen state
pub struct App<S = HttpItemSource> {
  lookup: LookupService<S>,
  input: CodeInput,
  scan: ScanState,
  /// Load failure shown as a popup until the next key press
  alert: Option<String>,
  display: DisplayConfig,
  source_url: String,
  should_quit: bool,
}

impl<S: ItemSource> App<S> {
  pub fn new(lookup: LookupService<S>, config: &Config) -> Self {
    Self {
      lookup,
      input: CodeInput::new(),
      scan: ScanState::Idle,
      alert: None,
      display: config.display.clone(),
      source_url: config.source.url.clone(),
      should_quit: false,
    }
  }

  pub async fn run(&mut self) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    stdout()
      .execute(EnterAlternateScreen)?
      .execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut events = EventHandler::new(Duration::from_millis(100));
    self.lookup.activate();

    let result = self.event_loop(&mut terminal, &mut events).await;

    // Cleanup terminal
    disable_raw_mode()?;
    stdout()
      .execute(DisableBracketedPaste)?
      .execute(LeaveAlternateScreen)?;

    result
  }

  async fn event_loop(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    events: &mut EventHandler,
  ) -> Result<()> {
    while !self.should_quit {
      terminal.draw(|frame| ui::draw(frame, self))?;

      match events.next().await {
        Some(event) => self.handle_event(event),
        None => break,
      }
    }
    Ok(())
  }

  fn handle_event(&mut self, event: Event) {
    match event {
      Event::Key(key) => self.handle_key(key),
      Event::Paste(text) => {
        self.alert = None;
        self.input.paste(&text);
      }
      Event::Tick => {}
    }
    // Ticks stop while keys stream in, loads must not wait for a pause
    self.tick();
  }

  /// Apply finished loads and pick up load failures.
  fn tick(&mut self) {
    self.lookup.poll();
    if let Some(notice) = self.lookup.take_notice() {
      self.alert = Some(notice);
    }
  }
}

impl<S> App<S> {
  fn handle_key(&mut self, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
      self.should_quit = true;
      return;
    }

    // Any key dismisses the alert and is still typed
    self.alert = None;

    match self.input.handle_key(key) {
      InputResult::Submitted(raw) => self.submit(&raw),
      InputResult::Cancelled => self.reset(),
      InputResult::Consumed | InputResult::NotHandled => {}
    }
  }

  fn submit(&mut self, raw: &str) {
    let Some(code) = normalize_input(raw) else {
      return;
    };

    let found = self.lookup.find_by_code(code);
    info!(code, found = found.is_some(), "Lookup");
    self.scan = ScanState::resolve(code, found);
    self.input.clear();
  }

  fn reset(&mut self) {
    self.scan = ScanState::Idle;
    self.input.clear();
  }

  // Accessors for UI rendering
  pub fn lookup(&self) -> &LookupService<S> {
    &self.lookup
  }

  pub fn scan(&self) -> &ScanState {
    &self.scan
  }

  pub fn input(&self) -> &CodeInput {
    &self.input
  }

  pub fn alert(&self) -> Option<&str> {
    self.alert.as_deref()
  }

  pub fn display(&self) -> &DisplayConfig {
    &self.display
  }

  pub fn source_url(&self) -> &str {
    &self.source_url
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::{Item, ItemList, NetworkError};

  struct FixedSource(Option<ItemList>);

  impl ItemSource for FixedSource {
    async fn fetch_all(&self) -> Result<ItemList, NetworkError> {
      self
        .0
        .clone()
        .ok_or(NetworkError::Status(reqwest::StatusCode::NOT_FOUND))
    }
  }

  fn item(sku: &str, upc: &str) -> Item {
    Item {
      sku: sku.to_string(),
      upc: upc.to_string(),
      description: format!("item {}", sku),
      ..Default::default()
    }
  }

  async fn app_with(items: Option<ItemList>) -> App<FixedSource> {
    let cache = ItemCache::new(NoopStorage);
    let mut app = App::new(
      LookupService::new(FixedSource(items), cache),
      &Config::default(),
    );
    app.lookup.activate();
    app.lookup.settle().await;
    app
  }

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn type_code(app: &mut App<FixedSource>, code: &str) {
    for c in code.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
  }

  #[tokio::test]
  async fn test_scan_found_then_reset() {
    let mut app = app_with(Some(vec![item("A1", "U1"), item("B2", "U2")])).await;

    type_code(&mut app, "U2");
    assert_eq!(app.scan().item().unwrap().sku, "B2");
    assert!(app.input().is_empty());

    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.scan(), &ScanState::Idle);
  }

  #[tokio::test]
  async fn test_scan_not_found() {
    let mut app = app_with(Some(vec![item("A1", "U1")])).await;
    type_code(&mut app, "999");
    assert_eq!(app.scan(), &ScanState::NotFound("999".to_string()));
  }

  #[tokio::test]
  async fn test_blank_submit_is_ignored() {
    let mut app = app_with(Some(vec![item("A1", "U1")])).await;
    type_code(&mut app, "A1");

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.scan().item().unwrap().sku, "A1");
  }

  #[tokio::test]
  async fn test_paste_then_submit() {
    let mut app = app_with(Some(vec![item("A1", "4800016644511")])).await;
    app.input.paste("4800016644511\n");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.scan().item().unwrap().sku, "A1");
  }

  #[tokio::test]
  async fn test_load_failure_raises_alert_dismissed_by_key() {
    let mut app = app_with(None).await;
    app.tick();
    assert!(app.alert().is_some());

    // Lookups still work, everything is simply not found
    type_code(&mut app, "A1");
    assert!(app.alert().is_none());
    assert_eq!(app.scan(), &ScanState::NotFound("A1".to_string()));
  }

  #[tokio::test]
  async fn test_scan_under_alert_keeps_first_digit() {
    let mut app = app_with(Some(vec![item("A1", "4800016644511")])).await;
    app.alert = Some("Failed to load items".to_string());

    type_code(&mut app, "4800016644511");

    assert!(app.alert().is_none());
    assert_eq!(app.scan().item().unwrap().sku, "A1");
  }

  #[tokio::test]
  async fn test_paste_dismisses_alert() {
    let mut app = app_with(Some(vec![item("A1", "U1")])).await;
    app.alert = Some("Failed to load items".to_string());

    app.handle_event(Event::Paste("U1".to_string()));

    assert!(app.alert().is_none());
    assert_eq!(app.input().value(), "U1");
  }

  #[tokio::test]
  async fn test_key_events_apply_finished_loads() {
    let mut app = App::new(
      LookupService::new(
        FixedSource(Some(vec![item("A1", "U1")])),
        ItemCache::new(NoopStorage),
      ),
      &Config::default(),
    );
    app.lookup.activate();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // No tick in between, only typing
    for c in "A1".chars() {
      app.handle_event(Event::Key(key(KeyCode::Char(c))));
    }
    assert!(!app.lookup().is_refreshing());
    app.handle_event(Event::Key(key(KeyCode::Enter)));

    assert_eq!(app.scan().item().unwrap().sku, "A1");
  }

  #[tokio::test]
  async fn test_ctrl_c_quits() {
    let mut app = app_with(Some(Vec::new())).await;
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
  }
}
