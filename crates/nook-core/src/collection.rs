//! [`PersistedCollection`] — the binding between one in-memory entity list
//! and its named slot in a [`KeyValueStore`].
//!
//! The slot is read once at load time; every mutation rewrites the full
//! serialized list immediately. There is no batching and no debouncing.
//!
//! Storage failures never propagate past this boundary: the in-memory list
//! stays authoritative and the dropped write merely degrades persistence to
//! the current session.

use tracing::warn;
use uuid::Uuid;

use crate::{
  entity::{Draft, Entity},
  storage::KeyValueStore,
};

// ─── Collection ──────────────────────────────────────────────────────────────

/// An ordered entity collection persisted under [`Entity::COLLECTION_KEY`].
///
/// New items append to the end; insertion order is display order.
pub struct PersistedCollection<E, S> {
  items:   Vec<E>,
  storage: S,
}

impl<E: Entity, S: KeyValueStore> PersistedCollection<E, S> {
  /// Read the collection's slot and bind to it.
  ///
  /// An absent or unparseable value falls back to the empty default, which is
  /// seeded back into storage so the slot is well-formed from then on.
  pub async fn load(storage: S) -> Self {
    let key = E::COLLECTION_KEY;

    let items = match storage.get(key).await {
      Ok(Some(raw)) => match serde_json::from_str::<Vec<E>>(&raw) {
        Ok(items) => Some(items),
        Err(err) => {
          warn!(key, %err, "stored collection is malformed; resetting");
          None
        }
      },
      Ok(None) => None,
      Err(err) => {
        warn!(key, %err, "storage unavailable; starting empty");
        None
      }
    };

    let (items, seed) = match items {
      Some(items) => (items, false),
      None => (Vec::new(), true),
    };

    let collection = Self { items, storage };
    if seed {
      collection.persist().await;
    }
    collection
  }

  pub fn items(&self) -> &[E] { &self.items }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }

  pub fn get(&self, id: Uuid) -> Option<&E> {
    self.items.iter().find(|item| item.id() == id)
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Append `entity` to the end of the collection and persist.
  pub async fn insert(&mut self, entity: E) {
    self.items.push(entity);
    self.persist().await;
  }

  /// Replace the mutable fields of the entity with `id` from `draft`.
  ///
  /// Returns `false` (without writing) if no entity has that id.
  pub async fn update<D>(&mut self, id: Uuid, draft: &D) -> bool
  where
    D: Draft<Entity = E>,
  {
    let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
      return false;
    };
    draft.apply_to(item);
    self.persist().await;
    true
  }

  /// Remove the entity with `id`. Removing an absent id is a no-op.
  pub async fn remove(&mut self, id: Uuid) -> bool {
    let before = self.items.len();
    self.items.retain(|item| item.id() != id);
    if self.items.len() == before {
      return false;
    }
    self.persist().await;
    true
  }

  /// Serialize the full list and write it to the slot, best-effort.
  async fn persist(&self) {
    let raw = match serde_json::to_string(&self.items) {
      Ok(raw) => raw,
      Err(err) => {
        warn!(key = E::COLLECTION_KEY, %err, "failed to serialize collection");
        return;
      }
    };
    if let Err(err) = self.storage.put(E::COLLECTION_KEY, &raw).await {
      warn!(key = E::COLLECTION_KEY, %err, "dropped collection write");
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::{Link, LinkDraft},
    storage::MemoryStore,
  };

  fn draft(name: &str, url: &str) -> LinkDraft {
    LinkDraft { name: name.into(), url: url.into(), tags: Vec::new() }
  }

  /// Store where every operation fails, for exercising the swallow policy.
  #[derive(Clone, Default)]
  struct BrokenStore;

  impl KeyValueStore for BrokenStore {
    type Error = std::io::Error;

    async fn get(&self, _key: &str) -> Result<Option<String>, std::io::Error> {
      Err(std::io::Error::other("storage unavailable"))
    }

    async fn put(&self, _key: &str, _value: &str) -> Result<(), std::io::Error> {
      Err(std::io::Error::other("disk full"))
    }
  }

  async fn links(storage: MemoryStore) -> PersistedCollection<Link, MemoryStore> {
    PersistedCollection::load(storage).await
  }

  #[tokio::test]
  async fn load_seeds_empty_slot() {
    let storage = MemoryStore::new();
    let collection = links(storage.clone()).await;

    assert!(collection.is_empty());
    assert_eq!(storage.get("links").await.unwrap().as_deref(), Some("[]"));
  }

  #[tokio::test]
  async fn load_resets_malformed_slot() {
    let storage = MemoryStore::new();
    storage.put("links", "{definitely not a list").await.unwrap();

    let collection = links(storage.clone()).await;
    assert!(collection.is_empty());
    assert_eq!(storage.get("links").await.unwrap().as_deref(), Some("[]"));
  }

  #[tokio::test]
  async fn insert_appends_and_persists() {
    let storage = MemoryStore::new();
    let mut collection = links(storage.clone()).await;

    collection.insert(draft("Docs", "https://example.com").build()).await;
    collection.insert(draft("Repo", "https://example.org").build()).await;

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.items()[0].name, "Docs");
    assert_eq!(collection.items()[1].name, "Repo");
    assert_ne!(collection.items()[0].id, collection.items()[1].id);
    assert!(collection.items()[0].created_at <= collection.items()[1].created_at);

    // The write hit storage immediately.
    let reloaded = links(storage).await;
    assert_eq!(reloaded.items(), collection.items());
  }

  #[tokio::test]
  async fn update_preserves_identity_fields() {
    let storage = MemoryStore::new();
    let mut collection = links(storage).await;

    collection.insert(draft("Docs", "https://example.com").build()).await;
    let id = collection.items()[0].id;
    let created_at = collection.items()[0].created_at;

    let changed = collection
      .update(id, &draft("Docs v2", "https://example.com/v2"))
      .await;

    assert!(changed);
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.items()[0].id, id);
    assert_eq!(collection.items()[0].created_at, created_at);
    assert_eq!(collection.items()[0].name, "Docs v2");
    assert_eq!(collection.items()[0].url, "https://example.com/v2");
  }

  #[tokio::test]
  async fn update_unknown_id_is_noop() {
    let storage = MemoryStore::new();
    let mut collection = links(storage).await;
    collection.insert(draft("Docs", "https://example.com").build()).await;

    let changed = collection.update(Uuid::new_v4(), &draft("x", "y")).await;
    assert!(!changed);
    assert_eq!(collection.items()[0].name, "Docs");
  }

  #[tokio::test]
  async fn remove_drops_exactly_one_entity() {
    let storage = MemoryStore::new();
    let mut collection = links(storage.clone()).await;

    collection.insert(draft("Docs", "https://example.com").build()).await;
    collection.insert(draft("Repo", "https://example.org").build()).await;
    let id = collection.items()[0].id;

    assert!(collection.remove(id).await);
    assert_eq!(collection.len(), 1);
    assert!(collection.get(id).is_none());

    // Removing again is a no-op.
    assert!(!collection.remove(id).await);
    assert_eq!(collection.len(), 1);
  }

  #[tokio::test]
  async fn failing_storage_keeps_the_in_memory_list_authoritative() {
    // Load starts empty despite the unavailable backend, and every mutation
    // still succeeds in memory even though each write is dropped.
    let mut collection: PersistedCollection<Link, _> =
      PersistedCollection::load(BrokenStore).await;
    assert!(collection.is_empty());

    collection.insert(draft("Docs", "https://example.com").build()).await;
    let id = collection.items()[0].id;

    let changed = collection
      .update(id, &draft("Docs v2", "https://example.com/v2"))
      .await;
    assert!(changed);
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.items()[0].name, "Docs v2");

    assert!(collection.remove(id).await);
    assert!(collection.is_empty());
  }

  #[tokio::test]
  async fn round_trip_is_structurally_equal() {
    let storage = MemoryStore::new();
    let mut collection = links(storage.clone()).await;

    let mut tagged = draft("Docs", "https://example.com");
    tagged.tags = vec![Uuid::new_v4(), Uuid::new_v4()];
    collection.insert(tagged.build()).await;

    let reloaded = links(storage).await;
    assert_eq!(reloaded.items(), collection.items());
  }
}
