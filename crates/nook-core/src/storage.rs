//! The `KeyValueStore` trait and the in-memory reference backend.
//!
//! The trait is implemented by storage backends (e.g. `nook-store-sqlite`).
//! Higher layers depend on this abstraction, not on any concrete backend, so
//! tests can swap in [`MemoryStore`] without behavior change.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Arc, Mutex, PoisonError},
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable local key-value string store.
///
/// Each key holds one serialized collection. Writes are last-writer-wins and
/// replace the prior value wholesale.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait KeyValueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored at `key`. Returns `None` if the slot is empty.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Persist `value` at `key`, replacing any prior value.
  fn put<'a>(
    &'a self,
    key: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A `HashMap`-backed store with no durability.
///
/// Cloning is cheap — the inner map is reference-counted, so clones observe
/// each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(slots.get(key).cloned())
  }

  async fn put(&self, key: &str, value: &str) -> Result<(), Infallible> {
    let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
    slots.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}
