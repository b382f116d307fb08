//! Application state machine and event dispatcher.
//!
//! Four pages mirror the four routes of the dashboard: Links, Emails, Tags,
//! and Tools. Each entity page owns one persisted collection plus its form;
//! the Tools page owns the lookup session. Focus alternates between the form
//! pane (top) and the list pane (bottom).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nook_core::{
  EntityForm, PersistedCollection, Submit,
  entity::{Email, EmailDraft, Link, LinkDraft, Tag, TagDraft},
};
use nook_lookup::{DnsClient, Fetch, LookupSession, RecordSet};
use nook_store_sqlite::SqliteStore;
use tokio::task::JoinHandle;
use uuid::Uuid;

// ─── Page / focus ─────────────────────────────────────────────────────────────

/// Which page is showing. Pages are switched with `1`–`4` from the list pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
  Links,
  Emails,
  Tags,
  Tools,
}

impl Page {
  pub fn title(self) -> &'static str {
    match self {
      Self::Links => "Links",
      Self::Emails => "Emails",
      Self::Tags => "Tags",
      Self::Tools => "Tools",
    }
  }

  /// Number of form fields on this page. The Links page counts its tag
  /// toggle row as a field so Tab can reach it.
  fn field_count(self) -> usize {
    match self {
      Self::Links => 3,
      Self::Emails | Self::Tags => 2,
      Self::Tools => 1,
    }
  }
}

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
  Form,
  List,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub page:  Page,
  pub focus: Focus,

  pub links:  PersistedCollection<Link, SqliteStore>,
  pub emails: PersistedCollection<Email, SqliteStore>,
  pub tags:   PersistedCollection<Tag, SqliteStore>,

  pub link_form:  EntityForm<LinkDraft>,
  pub email_form: EntityForm<EmailDraft>,
  pub tag_form:   EntityForm<TagDraft>,

  /// Active form field index on the current page.
  pub field: usize,

  /// Cursor within the tag toggle row (Links form only).
  pub tag_cursor: usize,

  /// Cursor within the current page's list; doubles as the result scroll
  /// offset on the Tools page.
  pub list_cursor: usize,

  /// Domain input for the lookup tool.
  pub domain: String,

  pub lookup: LookupSession,
  pub client: DnsClient,

  /// Background fetch for the lookup in flight, if any.
  lookup_task: Option<JoinHandle<nook_lookup::Result<RecordSet>>>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(
    links: PersistedCollection<Link, SqliteStore>,
    emails: PersistedCollection<Email, SqliteStore>,
    tags: PersistedCollection<Tag, SqliteStore>,
    client: DnsClient,
  ) -> Self {
    Self {
      page: Page::Links,
      focus: Focus::Form,
      links,
      emails,
      tags,
      link_form: EntityForm::new(),
      email_form: EntityForm::new(),
      tag_form: EntityForm::new(),
      field: 0,
      tag_cursor: 0,
      list_cursor: 0,
      domain: String::new(),
      lookup: LookupSession::new(),
      client,
      lookup_task: None,
      status_msg: String::new(),
    }
  }

  /// Length of the list on the current page.
  fn list_len(&self) -> usize {
    match self.page {
      Page::Links => self.links.len(),
      Page::Emails => self.emails.len(),
      Page::Tags => self.tags.len(),
      Page::Tools => 0,
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    match self.focus {
      Focus::Form => self.handle_form_key(key).await,
      Focus::List => self.handle_list_key(key).await,
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Leave the form; a pending edit is cancelled.
      KeyCode::Esc => {
        match self.page {
          Page::Links if self.link_form.is_editing() => self.link_form.clear(),
          Page::Emails if self.email_form.is_editing() => self.email_form.clear(),
          Page::Tags if self.tag_form.is_editing() => self.tag_form.clear(),
          _ => {}
        }
        self.focus = Focus::List;
      }

      KeyCode::Tab => {
        self.field = (self.field + 1) % self.page.field_count();
      }
      KeyCode::BackTab => {
        let count = self.page.field_count();
        self.field = (self.field + count - 1) % count;
      }

      KeyCode::Enter => self.submit().await,

      // Tag toggle row (Links page, third field).
      KeyCode::Left if self.on_tag_row() => {
        self.tag_cursor = self.tag_cursor.saturating_sub(1);
      }
      KeyCode::Right if self.on_tag_row() => {
        if self.tag_cursor + 1 < self.tags.len() {
          self.tag_cursor += 1;
        }
      }
      KeyCode::Char(' ') if self.on_tag_row() => {
        if let Some(tag) = self.tags.items().get(self.tag_cursor) {
          self.link_form.draft.toggle_tag(tag.id);
        }
      }

      KeyCode::Backspace => {
        if let Some(field) = self.active_field_mut() {
          field.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(field) = self.active_field_mut() {
          field.push(c);
        }
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Page switching
      KeyCode::Char('1') => self.switch_page(Page::Links),
      KeyCode::Char('2') => self.switch_page(Page::Emails),
      KeyCode::Char('3') => self.switch_page(Page::Tags),
      KeyCode::Char('4') => self.switch_page(Page::Tools),

      // Into the form
      KeyCode::Tab | KeyCode::Char('a') | KeyCode::Char('i') => {
        self.focus = Focus::Form;
        self.field = 0;
      }

      // Navigation / result scrolling
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.list_len();
        if self.page == Page::Tools {
          self.list_cursor += 1; // clamped by the renderer
        } else if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      // Edit the entry under the cursor.
      KeyCode::Enter | KeyCode::Char('e') => self.begin_edit(),

      // Delete immediately; no confirmation, no undo.
      KeyCode::Char('d') | KeyCode::Char('x') => self.delete_under_cursor().await,

      _ => {}
    }
    Ok(true)
  }

  fn switch_page(&mut self, page: Page) {
    self.page = page;
    self.field = 0;
    self.tag_cursor = 0;
    self.list_cursor = 0;
    self.status_msg.clear();
  }

  fn on_tag_row(&self) -> bool {
    self.page == Page::Links && self.field == 2
  }

  /// The string behind the active form field, if it is a text field.
  fn active_field_mut(&mut self) -> Option<&mut String> {
    match (self.page, self.field) {
      (Page::Links, 0) => Some(&mut self.link_form.draft.name),
      (Page::Links, 1) => Some(&mut self.link_form.draft.url),
      (Page::Emails, 0) => Some(&mut self.email_form.draft.address),
      (Page::Emails, 1) => Some(&mut self.email_form.draft.notes),
      (Page::Tags, 0) => Some(&mut self.tag_form.draft.name),
      (Page::Tags, 1) => Some(&mut self.tag_form.draft.color),
      (Page::Tools, 0) => Some(&mut self.domain),
      _ => None,
    }
  }

  // ── Actions ───────────────────────────────────────────────────────────────

  /// Submit the current page's form. Incomplete drafts are silently ignored.
  async fn submit(&mut self) {
    match self.page {
      Page::Links => {
        match self.link_form.submit(&mut self.links).await {
          Submit::Created(_) => self.after_submit("link added"),
          Submit::Updated(_) => self.after_submit("link updated"),
          Submit::Ignored => {}
        }
      }
      Page::Emails => {
        match self.email_form.submit(&mut self.emails).await {
          Submit::Created(_) => self.after_submit("email added"),
          Submit::Updated(_) => self.after_submit("email updated"),
          Submit::Ignored => {}
        }
      }
      Page::Tags => {
        match self.tag_form.submit(&mut self.tags).await {
          Submit::Created(_) => self.after_submit("tag added"),
          Submit::Updated(_) => self.after_submit("tag updated"),
          Submit::Ignored => {}
        }
      }
      Page::Tools => {
        // The fetch runs in the background so Loading paints and re-entrant
        // submissions hit the in-flight guard; `poll_lookup` settles the
        // session from the event loop once the task finishes.
        if self.lookup.begin(&self.domain) {
          self.list_cursor = 0;
          let client = self.client.clone();
          let domain = self.domain.clone();
          self.lookup_task =
            Some(tokio::spawn(async move { client.dns(&domain).await }));
        }
      }
    }
  }

  /// Settle the lookup session once the background fetch has finished.
  /// Called once per event-loop tick.
  pub async fn poll_lookup(&mut self) {
    if self.lookup_task.as_ref().is_some_and(|task| task.is_finished()) {
      if let Some(task) = self.lookup_task.take() {
        let outcome = task.await.unwrap_or_else(|err| Err(err.into()));
        self.lookup.settle(outcome);
      }
    }
  }

  fn after_submit(&mut self, msg: &str) {
    self.status_msg = msg.to_string();
    self.field = 0;
    self.tag_cursor = 0;
  }

  /// Populate the form from the entry under the list cursor.
  fn begin_edit(&mut self) {
    match self.page {
      Page::Links => {
        if let Some(link) = self.links.items().get(self.list_cursor).cloned() {
          self.link_form.begin_edit(&link);
        } else {
          return;
        }
      }
      Page::Emails => {
        if let Some(email) = self.emails.items().get(self.list_cursor).cloned() {
          self.email_form.begin_edit(&email);
        } else {
          return;
        }
      }
      Page::Tags => {
        if let Some(tag) = self.tags.items().get(self.list_cursor).cloned() {
          self.tag_form.begin_edit(&tag);
        } else {
          return;
        }
      }
      Page::Tools => return,
    }
    self.focus = Focus::Form;
    self.field = 0;
  }

  async fn delete_under_cursor(&mut self) {
    let removed = match self.page {
      Page::Links => {
        let id = self.link_under_cursor();
        match id {
          Some(id) => self.links.remove(id).await,
          None => false,
        }
      }
      Page::Emails => {
        let id = self.emails.items().get(self.list_cursor).map(|e| e.id);
        match id {
          Some(id) => self.emails.remove(id).await,
          None => false,
        }
      }
      Page::Tags => {
        // Deleting a tag leaves dangling ids in Link.tags; they are simply
        // skipped when the links render.
        let id = self.tags.items().get(self.list_cursor).map(|t| t.id);
        match id {
          Some(id) => self.tags.remove(id).await,
          None => false,
        }
      }
      Page::Tools => false,
    };

    if removed {
      self.status_msg = "deleted".to_string();
      let len = self.list_len();
      self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
      self.tag_cursor = self.tag_cursor.min(self.tags.len().saturating_sub(1));
    }
  }

  fn link_under_cursor(&self) -> Option<Uuid> {
    self.links.items().get(self.list_cursor).map(|l| l.id)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
