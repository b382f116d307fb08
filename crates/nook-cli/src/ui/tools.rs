//! Tools page — the DNS lookup widget.
//!
//! Renders whichever lookup state is current: an input hint when idle, a
//! loading notice, the generic error message, or the record set grouped by
//! top-level key with one line per list element.

use nook_lookup::{LookupState, RecordValue};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{
  app::{App, Focus},
  ui::field_line,
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(4), Constraint::Min(0)])
    .split(area);

  draw_input(f, rows[0], app);
  draw_results(f, rows[1], app);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
  let border_style = if app.focus == Focus::Form {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(" DNS Lookup ")
    .borders(Borders::ALL)
    .border_style(border_style);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let active = app.focus == Focus::Form;
  let lines = vec![
    field_line("Domain:", &app.domain, active),
    Line::from(Span::styled(
      "Enter fetches the records; lookups already in flight are ignored",
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_results(f: &mut Frame, area: Rect, app: &App) {
  let border_style = if app.focus == Focus::List {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(" Records ")
    .borders(Borders::ALL)
    .border_style(border_style);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines: Vec<Line> = match app.lookup.state() {
    LookupState::Idle => vec![Line::from(Span::styled(
      "Enter a domain (example.com) and press Enter.",
      Style::default().fg(Color::DarkGray),
    ))],

    LookupState::Loading => vec![Line::from(Span::styled(
      "Loading…",
      Style::default().fg(Color::Yellow),
    ))],

    LookupState::Error(msg) => vec![Line::from(Span::styled(
      msg.clone(),
      Style::default().fg(Color::Red),
    ))],

    LookupState::Success(records) => {
      let mut lines = Vec::new();
      for record in records.records() {
        match &record.value {
          RecordValue::Scalar(value) => {
            lines.push(Line::from(vec![
              Span::styled(
                format!("{}: ", record.name),
                Style::default().add_modifier(Modifier::BOLD),
              ),
              Span::raw(value.clone()),
            ]));
          }
          RecordValue::List(values) => {
            lines.push(Line::from(Span::styled(
              format!("{} records:", record.name),
              Style::default().add_modifier(Modifier::BOLD),
            )));
            for value in values {
              lines.push(Line::from(format!("  • {value}")));
            }
          }
        }
      }
      if lines.is_empty() {
        lines.push(Line::from(Span::styled(
          "No records returned.",
          Style::default().fg(Color::DarkGray),
        )));
      }
      lines
    }
  };

  // `list_cursor` doubles as the scroll offset here.
  let max_scroll = lines.len().saturating_sub(1);
  let scroll = app.list_cursor.min(max_scroll) as u16;
  f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}
