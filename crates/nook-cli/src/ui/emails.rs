//! Emails page — create/edit form and the contact list.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::{App, Focus},
  ui::field_line,
};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(5), Constraint::Min(0)])
    .split(area);

  draw_form(f, rows[0], app);
  draw_list(f, rows[1], app);
}

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
  let title = if app.email_form.is_editing() {
    " Edit Email "
  } else {
    " Add Email "
  };
  let border_style = if app.focus == Focus::Form {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border_style);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let active = app.focus == Focus::Form;
  let draft = &app.email_form.draft;

  let lines = vec![
    field_line("Address:", &draft.address, active && app.field == 0),
    field_line("Notes:", &draft.notes, active && app.field == 1),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
  let border_style = if app.focus == Focus::List {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(format!(" Emails ({}) ", app.emails.len()))
    .borders(Borders::ALL)
    .border_style(border_style);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = app
    .emails
    .items()
    .iter()
    .map(|email| {
      let mut spans = vec![Span::styled(
        email.address.clone(),
        Style::default().add_modifier(Modifier::BOLD),
      )];
      if !email.notes.is_empty() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
          email.notes.clone(),
          Style::default().fg(Color::Gray),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut state = ListState::default();
  state.select((!app.emails.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}
