//! [`EntityForm`] — the create/edit form state machine shared by all three
//! entity pages.
//!
//! A form is either creating (no `editing_id`) or editing one existing
//! entity. Submission dispatches accordingly, clears the form on success, and
//! silently ignores drafts whose required fields are empty — validation
//! failures are never surfaced.

use uuid::Uuid;

use crate::{
  collection::PersistedCollection,
  entity::{Draft, Entity},
  storage::KeyValueStore,
};

/// Outcome of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
  Created(Uuid),
  Updated(Uuid),
  /// Required fields were empty; nothing happened.
  Ignored,
}

/// Pending form state for one entity page.
pub struct EntityForm<D: Draft> {
  pub draft:  D,
  editing_id: Option<Uuid>,
}

impl<D: Draft> Default for EntityForm<D> {
  fn default() -> Self { Self::new() }
}

impl<D: Draft> EntityForm<D> {
  pub fn new() -> Self {
    Self { draft: D::default(), editing_id: None }
  }

  /// The id being edited, if an edit is in progress.
  pub fn editing_id(&self) -> Option<Uuid> { self.editing_id }

  pub fn is_editing(&self) -> bool { self.editing_id.is_some() }

  /// Populate the form from `entity` and mark it as the one being edited.
  /// The next submission commits an update, not a create.
  pub fn begin_edit(&mut self, entity: &D::Entity) {
    self.draft = D::from_entity(entity);
    self.editing_id = Some(entity.id());
  }

  /// Reset the fields and leave edit mode.
  pub fn clear(&mut self) {
    self.draft = D::default();
    self.editing_id = None;
  }

  /// Commit the pending draft into `collection`.
  ///
  /// With an `editing_id` set this replaces the matching entity's mutable
  /// fields in place; otherwise it appends a new entity. Either way the form
  /// clears afterwards — even when the edited entity has vanished in the
  /// meantime, in which case the update touches nothing.
  pub async fn submit<S>(
    &mut self,
    collection: &mut PersistedCollection<D::Entity, S>,
  ) -> Submit
  where
    S: KeyValueStore,
  {
    if !self.draft.is_complete() {
      return Submit::Ignored;
    }

    let outcome = match self.editing_id {
      Some(id) => {
        collection.update(id, &self.draft).await;
        Submit::Updated(id)
      }
      None => {
        let entity = self.draft.build();
        let id = entity.id();
        collection.insert(entity).await;
        Submit::Created(id)
      }
    };

    self.clear();
    outcome
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    entity::{Email, EmailDraft, Link, LinkDraft, Tag, TagDraft},
    storage::MemoryStore,
  };

  async fn collection<E: Entity>() -> PersistedCollection<E, MemoryStore> {
    PersistedCollection::load(MemoryStore::new()).await
  }

  #[tokio::test]
  async fn submit_creates_link_with_empty_tags() {
    let mut links = collection::<Link>().await;
    let mut form = EntityForm::<LinkDraft>::new();

    form.draft.name = "Docs".into();
    form.draft.url = "https://example.com".into();

    let outcome = form.submit(&mut links).await;
    let Submit::Created(id) = outcome else {
      panic!("expected Created, got {outcome:?}");
    };

    assert_eq!(links.len(), 1);
    let link = links.get(id).unwrap();
    assert_eq!(link.name, "Docs");
    assert_eq!(link.url, "https://example.com");
    assert!(link.tags.is_empty());

    // Form cleared for the next entry.
    assert_eq!(form.draft, LinkDraft::default());
    assert!(!form.is_editing());
  }

  #[tokio::test]
  async fn submit_with_missing_required_field_is_ignored() {
    let mut emails = collection::<Email>().await;
    let mut form = EntityForm::<EmailDraft>::new();

    form.draft.notes = "no address yet".into();

    assert_eq!(form.submit(&mut emails).await, Submit::Ignored);
    assert!(emails.is_empty());
    // An ignored submission leaves the fields untouched.
    assert_eq!(form.draft.notes, "no address yet");
  }

  #[tokio::test]
  async fn edit_then_submit_updates_in_place() {
    let mut tags = collection::<Tag>().await;
    let mut form = EntityForm::<TagDraft>::new();

    form.draft.name = "Work".into();
    form.submit(&mut tags).await;
    let original = tags.items()[0].clone();
    assert_eq!(original.color, crate::entity::DEFAULT_TAG_COLOR);

    form.begin_edit(&original);
    assert_eq!(form.editing_id(), Some(original.id));
    assert_eq!(form.draft.name, "Work");

    form.draft.color = "#FF0000".into();
    assert_eq!(form.submit(&mut tags).await, Submit::Updated(original.id));

    assert_eq!(tags.len(), 1);
    let updated = &tags.items()[0];
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.name, "Work");
    assert_eq!(updated.color, "#FF0000");
    assert!(!form.is_editing());
  }

  #[tokio::test]
  async fn editing_a_vanished_entity_still_clears_the_form() {
    let mut links = collection::<Link>().await;
    let mut form = EntityForm::<LinkDraft>::new();

    form.draft.name = "Docs".into();
    form.draft.url = "https://example.com".into();
    let Submit::Created(id) = form.submit(&mut links).await else {
      panic!("create failed");
    };

    form.begin_edit(&links.get(id).unwrap().clone());
    links.remove(id).await;

    assert_eq!(form.submit(&mut links).await, Submit::Updated(id));
    assert!(links.is_empty());
    assert!(!form.is_editing());
  }

  #[tokio::test]
  async fn clear_cancels_an_edit() {
    let mut emails = collection::<Email>().await;
    let mut form = EntityForm::<EmailDraft>::new();

    form.draft.address = "a@example.com".into();
    let Submit::Created(id) = form.submit(&mut emails).await else {
      panic!("create failed");
    };

    form.begin_edit(&emails.get(id).unwrap().clone());
    form.draft.address = "b@example.com".into();
    form.clear();

    assert!(!form.is_editing());
    assert_eq!(form.submit(&mut emails).await, Submit::Ignored);
    assert_eq!(emails.items()[0].address, "a@example.com");
  }
}
