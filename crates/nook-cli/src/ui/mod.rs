//! TUI rendering — orchestrates all pages.

pub mod emails;
pub mod links;
pub mod tags;
pub mod tools;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Focus, Page};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);

  match app.page {
    Page::Links => links::draw(f, rows[1], app),
    Page::Emails => emails::draw(f, rows[1], app),
    Page::Tags => tags::draw(f, rows[1], app),
    Page::Tools => tools::draw(f, rows[1], app),
  }

  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let mut spans = vec![Span::styled(
    " nook ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (i, page) in [Page::Links, Page::Emails, Page::Tags, Page::Tools]
    .into_iter()
    .enumerate()
  {
    let label = format!(" [{}] {} ", i + 1, page.title());
    let style = if page == app.page {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(label, style));
  }

  let left_width: u16 = spans.iter().map(|s| s.content.len() as u16).sum();
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right.content.len() as u16);
  spans.push(Span::raw(" ".repeat(pad as usize)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.focus {
    Focus::Form if app.page == Page::Tools => {
      ("INPUT", "Type a domain  Enter lookup  Esc results")
    }
    Focus::Form => (
      "FORM",
      "Type to fill  Tab field  Enter save  Esc list",
    ),
    Focus::List if app.page == Page::Tools => {
      ("RESULTS", "↑↓/jk scroll  Tab input  1-4 pages  q quit")
    }
    Focus::List => (
      "LIST",
      "↑↓/jk navigate  e edit  d delete  Tab form  1-4 pages  q quit",
    ),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::Gray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared helpers ───────────────────────────────────────────────────────────

/// Parse a `#RRGGBB` hex string. Colors are never validated on input, so
/// anything unparseable falls back to gray.
pub fn hex_color(hex: &str) -> Color {
  let raw = hex.strip_prefix('#').unwrap_or(hex);
  if raw.len() != 6 || !raw.is_ascii() {
    return Color::Gray;
  }
  match (
    u8::from_str_radix(&raw[0..2], 16),
    u8::from_str_radix(&raw[2..4], 16),
    u8::from_str_radix(&raw[4..6], 16),
  ) {
    (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
    _ => Color::Gray,
  }
}

/// One labelled form field; the active field gets a cursor and highlight.
pub fn field_line<'a>(label: &'a str, value: &'a str, active: bool) -> Line<'a> {
  let label_span = Span::styled(
    format!("{label:<9}"),
    Style::default().fg(Color::Gray),
  );
  if active {
    Line::from(vec![
      label_span,
      Span::styled(value, Style::default().fg(Color::Yellow)),
      Span::styled("_", Style::default().fg(Color::Yellow)),
    ])
  } else {
    Line::from(vec![label_span, Span::raw(value)])
  }
}
