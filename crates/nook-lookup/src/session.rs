//! The lookup state machine: Idle → Loading → (Success | Error) → Idle.
//!
//! Re-entering Loading on the next submission clears the prior outcome. A
//! boolean in-flight guard rejects a second lookup while one is outstanding;
//! the guard clears unconditionally when the call settles.

use std::future::Future;

use tracing::debug;

use crate::{Result, record::RecordSet};

/// The single user-visible failure string. Non-OK status, network failure,
/// and parse failure all collapse into this; the cause goes to the log only.
pub const GENERIC_ERROR: &str = "Failed to fetch DNS records";

/// The seam between the state machine and the network, so the machine is
/// testable without one. Implemented by [`crate::DnsClient`].
pub trait Fetch: Send + Sync {
  fn dns<'a>(
    &'a self,
    domain: &'a str,
  ) -> impl Future<Output = Result<RecordSet>> + Send + 'a;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
  #[default]
  Idle,
  Loading,
  Success(RecordSet),
  Error(String),
}

/// One lookup flow. Holds the current state plus the in-flight guard.
#[derive(Debug, Default)]
pub struct LookupSession {
  state:     LookupState,
  in_flight: bool,
}

impl LookupSession {
  pub fn new() -> Self { Self::default() }

  pub fn state(&self) -> &LookupState { &self.state }

  pub fn is_loading(&self) -> bool { self.in_flight }

  /// Try to start a lookup. Returns `false` — leaving the state untouched —
  /// when `domain` is empty or a lookup is already in flight.
  pub fn begin(&mut self, domain: &str) -> bool {
    if domain.is_empty() || self.in_flight {
      return false;
    }
    self.in_flight = true;
    self.state = LookupState::Loading;
    true
  }

  /// Record the outcome of the in-flight lookup and clear the guard.
  pub fn settle(&mut self, outcome: Result<RecordSet>) {
    self.state = match outcome {
      Ok(records) => LookupState::Success(records),
      Err(err) => {
        debug!(%err, "lookup failed");
        LookupState::Error(GENERIC_ERROR.to_string())
      }
    };
    self.in_flight = false;
  }

  /// Run one full lookup: begin, fetch, settle. Re-entrant submissions and
  /// empty input are ignored.
  pub async fn run<F: Fetch>(&mut self, fetcher: &F, domain: &str) {
    if !self.begin(domain) {
      return;
    }
    let outcome = fetcher.dns(domain).await;
    self.settle(outcome);
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;
  use serde_json::json;

  /// Stub fetcher that produces a fixed outcome per call.
  enum StubFetch {
    Ok(RecordSet),
    Status(u16),
  }

  impl Fetch for StubFetch {
    async fn dns(&self, _domain: &str) -> Result<RecordSet> {
      match self {
        Self::Ok(set) => Ok(set.clone()),
        Self::Status(code) => Err(Error::Status(
          reqwest::StatusCode::from_u16(*code).expect("valid status"),
        )),
      }
    }
  }

  fn records() -> RecordSet {
    RecordSet::from_json(json!({ "a": ["93.184.216.34"] })).unwrap()
  }

  #[test]
  fn begin_with_empty_domain_is_ignored() {
    let mut session = LookupSession::new();
    assert!(!session.begin(""));
    assert_eq!(*session.state(), LookupState::Idle);
    assert!(!session.is_loading());
  }

  #[test]
  fn begin_while_in_flight_is_ignored() {
    let mut session = LookupSession::new();
    assert!(session.begin("example.com"));
    assert_eq!(*session.state(), LookupState::Loading);
    assert!(!session.begin("example.org"));
  }

  #[test]
  fn settle_clears_guard_even_on_error() {
    let mut session = LookupSession::new();
    session.begin("example.com");
    session.settle(Err(Error::Malformed("expected a JSON object")));

    assert_eq!(
      *session.state(),
      LookupState::Error(GENERIC_ERROR.to_string())
    );
    assert!(!session.is_loading());

    // A subsequent attempt is accepted and clears the prior outcome.
    assert!(session.begin("example.com"));
    assert_eq!(*session.state(), LookupState::Loading);
  }

  #[tokio::test]
  async fn run_success_stores_the_record_set() {
    let mut session = LookupSession::new();
    session.run(&StubFetch::Ok(records()), "example.com").await;

    assert_eq!(*session.state(), LookupState::Success(records()));
    assert!(!session.is_loading());
  }

  #[tokio::test]
  async fn run_non_ok_status_becomes_generic_error() {
    let mut session = LookupSession::new();
    session.run(&StubFetch::Status(403), "example.com").await;

    assert_eq!(
      *session.state(),
      LookupState::Error(GENERIC_ERROR.to_string())
    );
    assert!(!session.is_loading());

    // The guard cleared, so a retry can start.
    assert!(session.begin("example.com"));
  }

  #[tokio::test]
  async fn run_with_empty_domain_leaves_state_untouched() {
    let mut session = LookupSession::new();
    session.run(&StubFetch::Ok(records()), "").await;
    assert_eq!(*session.state(), LookupState::Idle);
  }
}
