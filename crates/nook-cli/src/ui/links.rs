//! Links page — create/edit form, tag toggle row, and the link list.

use nook_core::resolve_tags;
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
    .constraints([Constraint::Length(7), Constraint::Min(0)])
    .split(area);

  draw_form(f, rows[0], app);
  draw_list(f, rows[1], app);
}

// ─── Form ─────────────────────────────────────────────────────────────────────

fn draw_form(f: &mut Frame, area: Rect, app: &App) {
  let title = if app.link_form.is_editing() {
    " Edit Link "
  } else {
    " Add Link "
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
  let draft = &app.link_form.draft;

  let lines = vec![
    field_line("Name:", &draft.name, active && app.field == 0),
    field_line("URL:", &draft.url, active && app.field == 1),
    tag_row(app, active && app.field == 2),
    Line::from(Span::styled(
      "Space toggles the highlighted tag; ←→ move",
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Paragraph::new(lines), inner);
}

/// The tag toggle row: one chip per available tag, selected chips filled.
fn tag_row<'a>(app: &'a App, active: bool) -> Line<'a> {
  let mut spans = vec![Span::styled(
    format!("{:<9}", "Tags:"),
    Style::default().fg(Color::Gray),
  )];

  if app.tags.is_empty() {
    spans.push(Span::styled(
      "(no tags yet — create some on the Tags page)",
      Style::default().fg(Color::DarkGray),
    ));
    return Line::from(spans);
  }

  for (i, tag) in app.tags.items().iter().enumerate() {
    let selected = app.link_form.draft.tags.contains(&tag.id);
    let color = hex_color(&tag.color);

    let mut style = if selected {
      Style::default().fg(Color::Black).bg(color)
    } else {
      Style::default().fg(color)
    };
    if active && i == app.tag_cursor {
      style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
    }

    let mark = if selected { "x" } else { " " };
    spans.push(Span::styled(format!("[{mark} {}]", tag.name), style));
    spans.push(Span::raw(" "));
  }

  Line::from(spans)
}

// ─── List ─────────────────────────────────────────────────────────────────────

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
  let border_style = if app.focus == Focus::List {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let block = Block::default()
    .title(format!(" Links ({}) ", app.links.len()))
    .borders(Borders::ALL)
    .border_style(border_style);
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items: Vec<ListItem> = app
    .links
    .items()
    .iter()
    .map(|link| {
      let mut first = vec![
        Span::styled(
          link.name.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(link.url.clone(), Style::default().fg(Color::Blue)),
      ];

      // Dangling tag ids are skipped here, not treated as errors.
      let resolved = resolve_tags(&link.tags, app.tags.items());
      if !resolved.is_empty() {
        first.push(Span::raw("  "));
        for tag in resolved {
          first.push(Span::styled(
            format!(" {} ", tag.name),
            Style::default().fg(Color::Black).bg(hex_color(&tag.color)),
          ));
          first.push(Span::raw(" "));
        }
      }

      ListItem::new(Line::from(first))
    })
    .collect();

  let mut state = ListState::default();
  state.select((!app.links.is_empty()).then_some(app.list_cursor));

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
