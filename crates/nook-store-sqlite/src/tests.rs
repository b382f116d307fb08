//! Integration tests for `SqliteStore` against an in-memory database.

use nook_core::{
  PersistedCollection,
  entity::{Draft, Link, LinkDraft, Tag, TagDraft},
  storage::KeyValueStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Slots ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_key_returns_none() {
  let s = store().await;
  assert_eq!(s.get("links").await.unwrap(), None);
}

#[tokio::test]
async fn put_then_get_round_trips() {
  let s = store().await;
  s.put("links", "[]").await.unwrap();
  assert_eq!(s.get("links").await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn put_replaces_prior_value() {
  let s = store().await;
  s.put("tags", "[1]").await.unwrap();
  s.put("tags", "[1,2]").await.unwrap();
  assert_eq!(s.get("tags").await.unwrap().as_deref(), Some("[1,2]"));
}

#[tokio::test]
async fn keys_are_independent() {
  let s = store().await;
  s.put("links", "[\"a\"]").await.unwrap();
  s.put("emails", "[\"b\"]").await.unwrap();

  assert_eq!(s.get("links").await.unwrap().as_deref(), Some("[\"a\"]"));
  assert_eq!(s.get("emails").await.unwrap().as_deref(), Some("[\"b\"]"));
}

// ─── Collections over SQLite ─────────────────────────────────────────────────

fn link(name: &str, url: &str) -> LinkDraft {
  LinkDraft { name: name.into(), url: url.into(), tags: Vec::new() }
}

#[tokio::test]
async fn collection_load_seeds_empty_slot() {
  let s = store().await;
  let links = PersistedCollection::<Link, _>::load(s.clone()).await;

  assert!(links.is_empty());
  assert_eq!(s.get("links").await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn collection_load_resets_malformed_slot() {
  let s = store().await;
  s.put("links", "not json at all").await.unwrap();

  let links = PersistedCollection::<Link, _>::load(s.clone()).await;
  assert!(links.is_empty());
  assert_eq!(s.get("links").await.unwrap().as_deref(), Some("[]"));
}

#[tokio::test]
async fn collection_crud_survives_reload() {
  let s = store().await;
  let mut links = PersistedCollection::<Link, _>::load(s.clone()).await;

  links.insert(link("Docs", "https://example.com").build()).await;
  links.insert(link("Repo", "https://example.org").build()).await;
  let first = links.items()[0].id;

  links
    .update(first, &link("Docs v2", "https://example.com/v2"))
    .await;
  let second = links.items()[1].id;
  links.remove(second).await;

  // A fresh binding over the same file sees the final state, field for field.
  let reloaded = PersistedCollection::<Link, _>::load(s).await;
  assert_eq!(reloaded.items(), links.items());
  assert_eq!(reloaded.len(), 1);
  assert_eq!(reloaded.items()[0].name, "Docs v2");
}

#[tokio::test]
async fn stored_value_is_a_plain_json_array() {
  let s = store().await;
  let mut tags = PersistedCollection::<Tag, _>::load(s.clone()).await;

  let draft = TagDraft { name: "Work".into(), color: "#3B82F6".into() };
  tags.insert(draft.build()).await;

  let raw = s.get("tags").await.unwrap().unwrap();
  let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

  let list = value.as_array().expect("top-level array");
  assert_eq!(list.len(), 1);
  assert_eq!(list[0]["name"], "Work");
  assert_eq!(list[0]["color"], "#3B82F6");
  assert!(list[0]["createdAt"].is_i64());
  assert!(Uuid::parse_str(list[0]["id"].as_str().unwrap()).is_ok());
}
