use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::catalog::{LoadState, Provenance};

/// What the header reports about the active list
pub struct CatalogStatus<'a> {
  pub source_url: &'a str,
  pub state: &'a LoadState,
  pub provenance: Option<Provenance>,
  pub item_count: usize,
  pub refreshing: bool,
}

/// Draw the header bar with name, source, and catalog status
pub fn draw_header(frame: &mut Frame, area: Rect, status: &CatalogStatus) {
  let domain = extract_domain(status.source_url);

  let mut spans = vec![
    Span::styled(" skuscan ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(format!(" {} ", domain), Style::default().fg(Color::White)),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
  ];

  let (label, color) = state_label(status.state);
  spans.push(Span::styled(format!(" {} ", label), Style::default().fg(color).bold()));

  if !status.state_is_error() {
    spans.push(Span::styled(
      format!(" {} items", status.item_count),
      Style::default().fg(Color::White),
    ));
    if let Some(provenance) = status.provenance {
      spans.push(Span::styled(
        format!(" ({})", provenance_label(provenance)),
        Style::default().fg(Color::DarkGray),
      ));
    }
  }

  if status.refreshing && status.state == &LoadState::Ready {
    spans.push(Span::styled("  refreshing…", Style::default().fg(Color::Yellow)));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

impl CatalogStatus<'_> {
  fn state_is_error(&self) -> bool {
    matches!(self.state, LoadState::Error(_))
  }
}

fn state_label(state: &LoadState) -> (&'static str, Color) {
  match state {
    LoadState::Loading => ("loading", Color::Yellow),
    LoadState::Ready => ("ready", Color::Green),
    LoadState::Error(_) => ("offline", Color::Red),
  }
}

fn provenance_label(provenance: Provenance) -> &'static str {
  match provenance {
    Provenance::Cache => "cached",
    Provenance::Network => "live",
  }
}

/// Extract domain from the endpoint URL
fn extract_domain(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}
