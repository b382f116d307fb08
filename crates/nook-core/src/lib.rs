//! Core types and trait definitions for the nook dashboard.
//!
//! This crate is deliberately free of HTTP and database dependencies; every
//! other crate in the workspace depends on it.

pub mod collection;
pub mod entity;
pub mod form;
pub mod storage;

pub use collection::PersistedCollection;
pub use entity::{
  Draft, Email, EmailDraft, Entity, Link, LinkDraft, Tag, TagDraft,
  resolve_tags,
};
pub use form::{EntityForm, Submit};
pub use storage::{KeyValueStore, MemoryStore};
