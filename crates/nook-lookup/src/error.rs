//! Error types for `nook-lookup`.
//!
//! The variants are kept distinct for logging; the UI collapses all of them
//! into one generic message (see [`crate::session`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport-level failure (connect, timeout, body read, JSON decode).
  #[error("request failed: {0}")]
  Transport(#[from] reqwest::Error),

  /// The endpoint answered with a non-success status.
  #[error("lookup returned status {0}")]
  Status(reqwest::StatusCode),

  /// The body was syntactically valid JSON but not a record object.
  #[error("malformed lookup response: {0}")]
  Malformed(&'static str),

  /// The endpoint answered OK but reported an error in the body.
  #[error("remote error: {0}")]
  Remote(String),

  /// The background task driving the request was cancelled or panicked.
  #[error("lookup task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
