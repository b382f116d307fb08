//! Entity records — the three persisted shapes of the dashboard.
//!
//! Every entity is an immutable-by-replacement record: `id` and `created_at`
//! are assigned once at creation and never change; all other fields are
//! replaced wholesale on edit.
//!
//! The serialized form is fixed for compatibility with previously stored
//! collections: camelCase field names, hyphenated UUID strings, and
//! `createdAt` as Unix epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

/// Color assigned to a new tag before the user picks one.
pub const DEFAULT_TAG_COLOR: &str = "#3B82F6";

/// Current time truncated to the wire precision (epoch milliseconds), so a
/// freshly created entity round-trips through storage structurally equal.
fn now_millis() -> DateTime<Utc> {
  let now = Utc::now();
  DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A persisted record belonging to exactly one named collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
  /// The storage slot this entity's collection lives under.
  const COLLECTION_KEY: &'static str;

  fn id(&self) -> Uuid;

  fn created_at(&self) -> DateTime<Utc>;

  /// One-line display label for list views.
  fn label(&self) -> &str;
}

/// The pending form payload for one entity type.
///
/// A draft carries every user-editable field. It knows how to check its own
/// required fields, build a brand-new entity, and overwrite the mutable
/// fields of an existing one.
pub trait Draft: Clone + Default + Send {
  type Entity: Entity;

  /// Required-field presence check. Incomplete drafts make submission a
  /// silent no-op.
  fn is_complete(&self) -> bool;

  /// Build a new entity with a fresh UUID and the current time.
  fn build(&self) -> Self::Entity;

  /// Overwrite the mutable fields of `entity`, preserving `id` and
  /// `created_at`.
  fn apply_to(&self, entity: &mut Self::Entity);

  /// Populate a draft from an existing entity (begin-edit).
  fn from_entity(entity: &Self::Entity) -> Self;
}

// ─── Link ────────────────────────────────────────────────────────────────────

/// A saved URL with a name and zero or more tag references.
///
/// `tags` holds soft references: nothing guarantees the referenced tag still
/// exists, and dangling ids are simply skipped at render time. Duplicates are
/// not prevented either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
  pub id:   Uuid,
  pub name: String,
  pub url:  String,
  pub tags: Vec<Uuid>,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
}

impl Entity for Link {
  const COLLECTION_KEY: &'static str = "links";

  fn id(&self) -> Uuid { self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn label(&self) -> &str { &self.name }
}

/// Form payload for a [`Link`]. Required fields: `name`, `url`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkDraft {
  pub name: String,
  pub url:  String,
  pub tags: Vec<Uuid>,
}

impl LinkDraft {
  /// Flip membership of `tag_id` in the pending tag list.
  ///
  /// Idempotent per click: present → removed, absent → added. Removal drops
  /// every occurrence, so a list that somehow holds duplicates still returns
  /// to its original set after two toggles.
  pub fn toggle_tag(&mut self, tag_id: Uuid) {
    if self.tags.contains(&tag_id) {
      self.tags.retain(|id| *id != tag_id);
    } else {
      self.tags.push(tag_id);
    }
  }
}

impl Draft for LinkDraft {
  type Entity = Link;

  fn is_complete(&self) -> bool {
    !self.name.is_empty() && !self.url.is_empty()
  }

  fn build(&self) -> Link {
    Link {
      id:         Uuid::new_v4(),
      name:       self.name.clone(),
      url:        self.url.clone(),
      tags:       self.tags.clone(),
      created_at: now_millis(),
    }
  }

  fn apply_to(&self, link: &mut Link) {
    link.name = self.name.clone();
    link.url = self.url.clone();
    link.tags = self.tags.clone();
  }

  fn from_entity(link: &Link) -> Self {
    Self {
      name: link.name.clone(),
      url:  link.url.clone(),
      tags: link.tags.clone(),
    }
  }
}

// ─── Email ───────────────────────────────────────────────────────────────────

/// A saved email contact. No uniqueness constraint on `address`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
  pub id:      Uuid,
  pub address: String,
  pub notes:   String,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
}

impl Entity for Email {
  const COLLECTION_KEY: &'static str = "emails";

  fn id(&self) -> Uuid { self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn label(&self) -> &str { &self.address }
}

/// Form payload for an [`Email`]. Required field: `address`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmailDraft {
  pub address: String,
  pub notes:   String,
}

impl Draft for EmailDraft {
  type Entity = Email;

  fn is_complete(&self) -> bool { !self.address.is_empty() }

  fn build(&self) -> Email {
    Email {
      id:         Uuid::new_v4(),
      address:    self.address.clone(),
      notes:      self.notes.clone(),
      created_at: now_millis(),
    }
  }

  fn apply_to(&self, email: &mut Email) {
    email.address = self.address.clone();
    email.notes = self.notes.clone();
  }

  fn from_entity(email: &Email) -> Self {
    Self {
      address: email.address.clone(),
      notes:   email.notes.clone(),
    }
  }
}

// ─── Tag ─────────────────────────────────────────────────────────────────────

/// A color-coded label. No uniqueness constraint on name or color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
  pub id:    Uuid,
  pub name:  String,
  /// Hex color string, e.g. `#3B82F6`. Not validated.
  pub color: String,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub created_at: DateTime<Utc>,
}

impl Entity for Tag {
  const COLLECTION_KEY: &'static str = "tags";

  fn id(&self) -> Uuid { self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn label(&self) -> &str { &self.name }
}

/// Form payload for a [`Tag`]. Required field: `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagDraft {
  pub name:  String,
  pub color: String,
}

impl Default for TagDraft {
  fn default() -> Self {
    Self {
      name:  String::new(),
      color: DEFAULT_TAG_COLOR.to_string(),
    }
  }
}

impl Draft for TagDraft {
  type Entity = Tag;

  fn is_complete(&self) -> bool { !self.name.is_empty() }

  fn build(&self) -> Tag {
    Tag {
      id:         Uuid::new_v4(),
      name:       self.name.clone(),
      color:      self.color.clone(),
      created_at: now_millis(),
    }
  }

  fn apply_to(&self, tag: &mut Tag) {
    tag.name = self.name.clone();
    tag.color = self.color.clone();
  }

  fn from_entity(tag: &Tag) -> Self {
    Self {
      name:  tag.name.clone(),
      color: tag.color.clone(),
    }
  }
}

// ─── Soft-reference resolution ───────────────────────────────────────────────

/// Resolve a link's tag ids against the live tag collection.
///
/// Dangling references (tags deleted since the link was saved) are silently
/// omitted; referential integrity is deliberately not enforced.
pub fn resolve_tags<'a>(ids: &[Uuid], available: &'a [Tag]) -> Vec<&'a Tag> {
  ids
    .iter()
    .filter_map(|id| available.iter().find(|tag| tag.id == *id))
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn tag(name: &str, color: &str) -> Tag {
    TagDraft { name: name.into(), color: color.into() }.build()
  }

  #[test]
  fn build_assigns_fresh_id_and_timestamp() {
    let draft = LinkDraft {
      name: "Docs".into(),
      url:  "https://example.com".into(),
      tags: Vec::new(),
    };
    let a = draft.build();
    let b = draft.build();

    assert_ne!(a.id, b.id);
    assert!(a.created_at <= b.created_at);
    assert_eq!(a.name, "Docs");
    assert_eq!(a.url, "https://example.com");
    assert!(a.tags.is_empty());
  }

  #[test]
  fn apply_preserves_id_and_created_at() {
    let mut tag = tag("Work", "#3B82F6");
    let id = tag.id;
    let created_at = tag.created_at;

    let edit = TagDraft { name: "Work".into(), color: "#FF0000".into() };
    edit.apply_to(&mut tag);

    assert_eq!(tag.id, id);
    assert_eq!(tag.created_at, created_at);
    assert_eq!(tag.name, "Work");
    assert_eq!(tag.color, "#FF0000");
  }

  #[test]
  fn toggle_tag_is_idempotent_under_double_click() {
    let work = Uuid::new_v4();
    let home = Uuid::new_v4();
    let mut draft = LinkDraft { tags: vec![home], ..Default::default() };

    draft.toggle_tag(work);
    assert_eq!(draft.tags, vec![home, work]);

    draft.toggle_tag(work);
    assert_eq!(draft.tags, vec![home]);
  }

  #[test]
  fn incomplete_drafts_are_detected() {
    assert!(!LinkDraft { name: "Docs".into(), ..Default::default() }.is_complete());
    assert!(!EmailDraft::default().is_complete());
    // A fresh tag draft has a default color but no name.
    assert!(!TagDraft::default().is_complete());
  }

  #[test]
  fn resolve_tags_skips_dangling_references() {
    let work = tag("Work", "#3B82F6");
    let deleted = Uuid::new_v4();
    let available = vec![work.clone()];

    let resolved = resolve_tags(&[deleted, work.id], &available);
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].id, work.id);
  }

  #[test]
  fn wire_format_is_stable() {
    let link = Link {
      id:         Uuid::nil(),
      name:       "Docs".into(),
      url:        "https://example.com".into(),
      tags:       vec![Uuid::nil()],
      created_at: DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
    };

    let json = serde_json::to_value(&link).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "name": "Docs",
        "url": "https://example.com",
        "tags": ["00000000-0000-0000-0000-000000000000"],
        "createdAt": 1_700_000_000_000_i64,
      })
    );
  }
}
