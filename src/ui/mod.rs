pub mod components;
mod renderfns;
mod views;

use crate::app::App;
use ratatui::prelude::*;
use renderfns::{draw_footer, draw_header, CatalogStatus};

const HINTS: &[(&str, &str)] = &[
  ("Enter", "look up"),
  ("Esc", "scan again"),
  ("Ctrl-U", "clear"),
  ("Ctrl-C", "quit"),
];

/// Main draw function
pub fn draw<S>(frame: &mut Frame, app: &App<S>) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // Header
      Constraint::Min(1),    // Result
      Constraint::Length(3), // Code input
      Constraint::Length(1), // Footer
    ])
    .split(frame.area());

  let lookup = app.lookup();
  let status = CatalogStatus {
    source_url: app.source_url(),
    state: lookup.state(),
    provenance: lookup.provenance(),
    item_count: lookup.items().len(),
    refreshing: lookup.is_refreshing(),
  };
  draw_header(frame, chunks[0], &status);

  views::draw_result(
    frame,
    chunks[1],
    app.scan(),
    lookup.state(),
    app.display(),
  );
  views::draw_input(frame, chunks[2], app.input());

  draw_footer(frame, chunks[3], HINTS);

  if let Some(alert) = app.alert() {
    let area = frame.area();
    views::draw_alert(frame, area, alert);
  }
}
