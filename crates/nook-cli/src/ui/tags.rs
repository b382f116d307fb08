//! Tags page — create/edit form with a live color swatch, and the tag list.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::{App, Focus},
  ui::{field_line, hex_color},
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
  let title = if app.tag_form.is_editing() {
    " Edit Tag "
  } else {
    " Add Tag "
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
  let draft = &app.tag_form.draft;

  let mut color_line = field_line("Color:", &draft.color, active && app.field == 1);
  color_line.spans.push(Span::raw("  "));
  color_line.spans.push(Span::styled(
    "██",
    Style::default().fg(hex_color(&draft.color)),
  ));

  let lines = vec![
    field_line("Name:", &draft.name, active && app.field == 0),
    color_line,
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
    .title(format!(" Tags ({}) ", app.tags.len()))
    .borders(Borders::ALL)
    .border_style(border_style);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = app
    .tags
    .items()
    .iter()
    .map(|tag| {
      ListItem::new(Line::from(vec![
        Span::styled("● ", Style::default().fg(hex_color(&tag.color))),
        Span::styled(
          tag.name.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(tag.color.clone(), Style::default().fg(Color::Gray)),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select((!app.tags.is_empty()).then_some(app.list_cursor));

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
