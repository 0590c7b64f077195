use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::catalog::{department, Item, LoadState};
use crate::config::DisplayConfig;
use crate::scan::{format_price, search_link, ScanState};
use crate::ui::components::CodeInput;
use crate::ui::renderfns::{department_color, truncate};

const DESCRIPTION_WIDTH: usize = 60;

/// Draw the result area: a status banner above the item card
pub fn draw_result(
  frame: &mut Frame,
  area: Rect,
  scan: &ScanState,
  state: &LoadState,
  display: &DisplayConfig,
) {
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(2), Constraint::Min(1)])
    .split(area);

  let banner = Paragraph::new(banner_line(scan, state)).wrap(Wrap { trim: true });
  frame.render_widget(banner, chunks[0]);

  let block = Block::default().borders(Borders::ALL).title(" Item ");
  let body = match scan.item() {
    Some(item) => Paragraph::new(item_lines(item, display)),
    None => Paragraph::new(Line::styled(
      "Scan or type a SKU/UPC and press Enter",
      Style::default().fg(Color::DarkGray),
    )),
  };
  frame.render_widget(body.block(block), chunks[1]);
}

/// Draw the code input with the terminal cursor placed in it
pub fn draw_input(frame: &mut Frame, area: Rect, input: &CodeInput) {
  let block = Block::default()
    .borders(Borders::ALL)
    .title(" SKU or UPC ")
    .border_style(Style::default().fg(Color::Yellow));

  let paragraph = Paragraph::new(input.value()).block(block);
  frame.render_widget(paragraph, area);

  let x = area.x + 1 + input.cursor_position() as u16;
  frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
}

/// Draw a centered popup over everything else
pub fn draw_alert(frame: &mut Frame, area: Rect, message: &str) {
  let popup = centered(area, 60, 7);

  let block = Block::default()
    .borders(Borders::ALL)
    .title(" Error ")
    .border_style(Style::default().fg(Color::Red));
  let paragraph = Paragraph::new(vec![
    Line::raw(message.to_string()),
    Line::default(),
    Line::styled("Press any key", Style::default().fg(Color::DarkGray)),
  ])
  .wrap(Wrap { trim: true })
  .block(block);

  frame.render_widget(Clear, popup);
  frame.render_widget(paragraph, popup);
}

/// A rect of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}

fn banner_line(scan: &ScanState, state: &LoadState) -> Line<'static> {
  if let ScanState::NotFound(code) = scan {
    return Line::from(vec![
      Span::styled("⚠ NO RECORD ", Style::default().fg(Color::Red).bold()),
      Span::styled(format!("for {}", code), Style::default().fg(Color::White)),
      Span::styled("   <Esc> scan again", Style::default().fg(Color::DarkGray)),
    ]);
  }

  match state {
    LoadState::Loading => Line::styled("Loading items…", Style::default().fg(Color::Yellow)),
    LoadState::Error(message) => Line::styled(message.clone(), Style::default().fg(Color::Red)),
    LoadState::Ready => Line::default(),
  }
}

/// Detail lines for a found item
fn item_lines(item: &Item, display: &DisplayConfig) -> Vec<Line<'static>> {
  let label = Style::default().fg(Color::Gray);
  let value = Style::default().fg(Color::White).bold();
  let link = Style::default().fg(Color::Magenta).underlined();

  let department_label = department::label_for(&item.department);
  let sub_department_label = department::label_for(&item.sub_department);

  vec![
    Line::styled("Description:", label),
    Line::styled(
      format!("  {}", truncate(&item.description, DESCRIPTION_WIDTH)),
      value,
    ),
    Line::styled("Department:", label),
    Line::styled(
      format!("  {}", department_label),
      value.fg(department_color(department_label)),
    ),
    Line::styled("Sub Department:", label),
    Line::styled(
      format!("  {}", sub_department_label),
      value.fg(department_color(sub_department_label)),
    ),
    Line::styled("SKU:", label),
    Line::from(vec![
      Span::styled(format!("  {}  ", item.sku), value),
      Span::styled(search_link(&display.search_url, &item.sku), link),
    ]),
    Line::styled("UPC:", label),
    Line::from(vec![
      Span::styled(format!("  {}  ", item.upc), value),
      Span::styled(search_link(&display.search_url, &item.upc), link),
    ]),
    Line::styled("Price:", label),
    Line::styled(
      format!("  {}", format_price(&display.currency, item)),
      value,
    ),
  ]
}
