//! `nook` — a terminal dashboard for links, email contacts, and tags.
//!
//! # Usage
//!
//! ```text
//! nook --data ~/.local/share/nook/nook.db
//! nook --config ~/.config/nook/config.toml --token <host.io token>
//! ```

mod app;
mod ui;

use std::{io, path::Path, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use nook_core::PersistedCollection;
use nook_lookup::{DEFAULT_BASE_URL, DnsClient, LookupConfig};
use nook_store_sqlite::SqliteStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "nook", about = "Terminal dashboard for links, emails, and tags")]
struct Args {
  /// Path to a TOML config file (data, token, lookup_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Path to the SQLite data file (default: ./nook.db).
  #[arg(long, env = "NOOK_DATA")]
  data: Option<std::path::PathBuf>,

  /// API token for the DNS lookup tool.
  #[arg(long, env = "NOOK_API_TOKEN")]
  token: Option<String>,

  /// Base URL of the lookup API (default: https://host.io/api).
  #[arg(long, env = "NOOK_LOOKUP_URL")]
  lookup_url: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  data:       String,
  #[serde(default)]
  token:      String,
  #[serde(default)]
  lookup_url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Log output would corrupt the alternate screen, so tracing is opt-in:
  // set NOOK_LOG to a filter directive and redirect stderr somewhere useful.
  if std::env::var_os("NOOK_LOG").is_some() {
    tracing_subscriber::fmt()
      .with_env_filter(tracing_subscriber::EnvFilter::from_env("NOOK_LOG"))
      .with_writer(io::stderr)
      .init();
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let data_path = args
    .data
    .or_else(|| (!file_cfg.data.is_empty()).then(|| file_cfg.data.clone().into()))
    .unwrap_or_else(|| "nook.db".into());
  let lookup_config = LookupConfig {
    base_url: args
      .lookup_url
      .or_else(|| (!file_cfg.lookup_url.is_empty()).then(|| file_cfg.lookup_url.clone()))
      .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    token:    args
      .token
      .or_else(|| (!file_cfg.token.is_empty()).then(|| file_cfg.token.clone()))
      .unwrap_or_default(),
  };

  let (store, storage_warning) = open_store(&data_path).await?;

  // Each collection reads its slot once here; every later mutation writes
  // straight back through the store.
  let links = PersistedCollection::load(store.clone()).await;
  let emails = PersistedCollection::load(store.clone()).await;
  let tags = PersistedCollection::load(store).await;
  tracing::info!(
    links = links.len(),
    emails = emails.len(),
    tags = tags.len(),
    "collections loaded"
  );

  let client = DnsClient::new(lookup_config).context("building lookup client")?;
  let mut app = App::new(links, emails, tags, client);
  if let Some(warning) = storage_warning {
    app.status_msg = warning;
  }

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

/// Open the durable store at `path`, degrading to a session-only in-memory
/// database when the file cannot be opened. The second element is a warning
/// for the status bar when persistence was lost.
async fn open_store(path: &Path) -> Result<(SqliteStore, Option<String>)> {
  match SqliteStore::open(path).await {
    Ok(store) => Ok((store, None)),
    Err(err) => {
      tracing::warn!(
        path = %path.display(),
        %err,
        "data file unavailable; using in-memory storage"
      );
      let store = SqliteStore::open_in_memory()
        .await
        .context("opening in-memory fallback store")?;
      let warning = format!(
        "could not open {}; changes will not be saved",
        path.display()
      );
      Ok((store, Some(warning)))
    }
  }
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    app.poll_lookup().await;
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use nook_core::storage::KeyValueStore as _;

  use super::*;

  #[tokio::test]
  async fn unopenable_data_file_degrades_to_in_memory() {
    // `/dev/null` is not a directory, so this open must fail.
    let (store, warning) = open_store(Path::new("/dev/null/nook.db"))
      .await
      .expect("fallback store");

    assert!(warning.is_some());
    // The session-only store still works.
    store.put("links", "[]").await.expect("write");
    assert_eq!(store.get("links").await.unwrap().as_deref(), Some("[]"));
  }

  #[tokio::test]
  async fn openable_data_file_keeps_persistence() {
    let dir = std::env::temp_dir().join(format!("nook-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("nook.db");

    let (store, warning) = open_store(&path).await.expect("store");
    assert!(warning.is_none());
    store.put("links", "[]").await.expect("write");

    std::fs::remove_dir_all(&dir).ok();
  }
}
