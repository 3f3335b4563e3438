//! [`ContactService`] — owner-scoped access to contacts.
//!
//! Every operation takes the caller's [`OwnerId`] and passes it to the store as
//! a match condition. "No such contact for this caller" is `Ok(None)`, whether
//! the id is unknown or belongs to another owner.

use std::sync::Arc;

use crate::{
  Error, Result,
  contact::{Contact, ContactId, ContactUpdate, NewContact, OwnerId},
  store::ContactStore,
};

pub struct ContactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ContactStore> ContactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// All contacts owned by `owner`; empty if there are none.
  pub async fn list(&self, owner: &OwnerId) -> Result<Vec<Contact>> {
    self.store.list(owner.clone()).await.map_err(Error::store)
  }

  pub async fn get_by_id(&self, id: ContactId, owner: &OwnerId) -> Result<Option<Contact>> {
    self.store.find(id, owner.clone()).await.map_err(Error::store)
  }

  /// Persist `input` under a fresh id, owned by `owner`.
  pub async fn create(&self, input: NewContact, owner: &OwnerId) -> Result<Contact> {
    let contact = Contact::new(input, owner.clone());
    self.store.insert(contact).await.map_err(Error::store)
  }

  /// Delete the contact and return what it was.
  pub async fn remove(&self, id: ContactId, owner: &OwnerId) -> Result<Option<Contact>> {
    self
      .store
      .find_and_delete(id, owner.clone())
      .await
      .map_err(Error::store)
  }

  /// Overwrite the fields present in `update`.
  pub async fn replace(
    &self,
    id: ContactId,
    update: ContactUpdate,
    owner: &OwnerId,
  ) -> Result<Option<Contact>> {
    self
      .store
      .find_and_update(id, owner.clone(), update)
      .await
      .map_err(Error::store)
  }

  /// Set only the favorite flag.
  ///
  /// A missing flag fails with [`Error::MissingFavorite`] before the store is
  /// consulted.
  pub async fn patch_favorite(
    &self,
    id: ContactId,
    favorite: Option<bool>,
    owner: &OwnerId,
  ) -> Result<Option<Contact>> {
    let flag = favorite.ok_or(Error::MissingFavorite)?;
    self
      .store
      .find_and_update(id, owner.clone(), ContactUpdate::favorite_only(flag))
      .await
      .map_err(Error::store)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
  };

  use serde_json::json;

  use super::*;
  use crate::validation::{validate_contact_update, validate_new_contact};

  /// A vector-backed store that counts every call it receives.
  #[derive(Default)]
  struct MemoryStore {
    rows:  Mutex<Vec<Contact>>,
    calls: AtomicUsize,
  }

  impl MemoryStore {
    fn touch(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }

    fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    fn len(&self) -> usize { self.rows.lock().unwrap().len() }
  }

  impl ContactStore for MemoryStore {
    type Error = std::convert::Infallible;

    async fn list(&self, owner: OwnerId) -> Result<Vec<Contact>, Self::Error> {
      self.touch();
      let rows = self.rows.lock().unwrap();
      Ok(rows.iter().filter(|c| c.owner_id == owner).cloned().collect())
    }

    async fn find(&self, id: ContactId, owner: OwnerId) -> Result<Option<Contact>, Self::Error> {
      self.touch();
      let rows = self.rows.lock().unwrap();
      Ok(rows.iter().find(|c| c.id == id && c.owner_id == owner).cloned())
    }

    async fn insert(&self, contact: Contact) -> Result<Contact, Self::Error> {
      self.touch();
      self.rows.lock().unwrap().push(contact.clone());
      Ok(contact)
    }

    async fn find_and_update(
      &self,
      id: ContactId,
      owner: OwnerId,
      update: ContactUpdate,
    ) -> Result<Option<Contact>, Self::Error> {
      self.touch();
      let mut rows = self.rows.lock().unwrap();
      Ok(rows.iter_mut().find(|c| c.id == id && c.owner_id == owner).map(|c| {
        c.apply(&update);
        c.clone()
      }))
    }

    async fn find_and_delete(
      &self,
      id: ContactId,
      owner: OwnerId,
    ) -> Result<Option<Contact>, Self::Error> {
      self.touch();
      let mut rows = self.rows.lock().unwrap();
      let pos = rows.iter().position(|c| c.id == id && c.owner_id == owner);
      Ok(pos.map(|i| rows.remove(i)))
    }
  }

  /// A store whose every call fails.
  struct BrokenStore;

  #[derive(Debug, thiserror::Error)]
  #[error("database unavailable")]
  struct Unavailable;

  impl ContactStore for BrokenStore {
    type Error = Unavailable;

    async fn list(&self, _: OwnerId) -> Result<Vec<Contact>, Self::Error> { Err(Unavailable) }
    async fn find(&self, _: ContactId, _: OwnerId) -> Result<Option<Contact>, Self::Error> { Err(Unavailable) }
    async fn insert(&self, _: Contact) -> Result<Contact, Self::Error> { Err(Unavailable) }
    async fn find_and_update(&self, _: ContactId, _: OwnerId, _: ContactUpdate) -> Result<Option<Contact>, Self::Error> { Err(Unavailable) }
    async fn find_and_delete(&self, _: ContactId, _: OwnerId) -> Result<Option<Contact>, Self::Error> { Err(Unavailable) }
  }

  fn service() -> (ContactService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (ContactService::new(store.clone()), store)
  }

  fn ann() -> NewContact {
    validate_new_contact(&json!({ "name": "Ann", "email": "ann@x.com", "phone": "123" }))
      .unwrap()
  }

  fn owner(id: &str) -> OwnerId { OwnerId::new(id) }

  #[tokio::test]
  async fn create_binds_owner_and_defaults() {
    let (svc, _) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    assert_eq!(c.owner_id, owner("u1"));
    assert_eq!(c.name, "Ann");
    assert!(!c.favorite);
  }

  #[tokio::test]
  async fn create_ignores_owner_in_payload() {
    let (svc, _) = service();
    let input = validate_new_contact(&json!({
      "name": "Ann", "email": "ann@x.com", "phone": "123", "ownerId": "u2", "id": "abc"
    }))
    .unwrap();
    let c = svc.create(input, &owner("u1")).await.unwrap();
    assert_eq!(c.owner_id, owner("u1"));
    assert_ne!(c.id.to_string(), "abc");
  }

  #[tokio::test]
  async fn create_then_get_round_trips() {
    let (svc, _) = service();
    let created = svc.create(ann(), &owner("u1")).await.unwrap();
    let fetched = svc.get_by_id(created.id, &owner("u1")).await.unwrap();
    assert_eq!(fetched, Some(created));
  }

  #[tokio::test]
  async fn foreign_contact_is_absent() {
    let (svc, _) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    assert_eq!(svc.get_by_id(c.id, &owner("u2")).await.unwrap(), None);
    assert_eq!(svc.get_by_id(ContactId::new(), &owner("u1")).await.unwrap(), None);
  }

  #[tokio::test]
  async fn list_is_owner_scoped() {
    let (svc, _) = service();
    svc.create(ann(), &owner("u1")).await.unwrap();
    svc.create(ann(), &owner("u1")).await.unwrap();
    svc.create(ann(), &owner("u2")).await.unwrap();

    let mine = svc.list(&owner("u1")).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|c| c.owner_id == owner("u1")));
    assert!(svc.list(&owner("u3")).await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn remove_returns_prior_state() {
    let (svc, store) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    let removed = svc.remove(c.id, &owner("u1")).await.unwrap();
    assert_eq!(removed, Some(c.clone()));
    assert_eq!(store.len(), 0);
    assert_eq!(svc.get_by_id(c.id, &owner("u1")).await.unwrap(), None);
  }

  #[tokio::test]
  async fn remove_foreign_leaves_contact() {
    let (svc, store) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    assert_eq!(svc.remove(c.id, &owner("u2")).await.unwrap(), None);
    assert_eq!(store.len(), 1);
  }

  #[tokio::test]
  async fn remove_and_replace_are_idempotent_on_absent() {
    let (svc, store) = service();
    let missing = ContactId::new();
    let update = validate_contact_update(&json!({ "name": "X" })).unwrap();
    for _ in 0..2 {
      assert_eq!(svc.remove(missing, &owner("u1")).await.unwrap(), None);
      assert_eq!(
        svc.replace(missing, update.clone(), &owner("u1")).await.unwrap(),
        None
      );
    }
    assert_eq!(store.len(), 0);
  }

  #[tokio::test]
  async fn replace_updates_present_fields_only() {
    let (svc, _) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    let update = validate_contact_update(&json!({ "email": "ann@y.org" })).unwrap();
    let updated = svc.replace(c.id, update, &owner("u1")).await.unwrap().unwrap();
    assert_eq!(updated.email, "ann@y.org");
    assert_eq!(updated.name, c.name);
    assert_eq!(updated.phone, c.phone);
    assert_eq!(updated.id, c.id);
  }

  #[tokio::test]
  async fn replace_foreign_is_absent_and_unchanged() {
    let (svc, _) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    let update = validate_contact_update(&json!({ "name": "Mallory" })).unwrap();
    assert_eq!(svc.replace(c.id, update, &owner("u2")).await.unwrap(), None);
    let still = svc.get_by_id(c.id, &owner("u1")).await.unwrap().unwrap();
    assert_eq!(still.name, "Ann");
  }

  #[tokio::test]
  async fn patch_favorite_changes_only_flag() {
    let (svc, _) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    let updated = svc
      .patch_favorite(c.id, Some(true), &owner("u1"))
      .await
      .unwrap()
      .unwrap();
    assert!(updated.favorite);
    assert_eq!(updated.name, c.name);
    assert_eq!(updated.email, c.email);
    assert_eq!(updated.phone, c.phone);
  }

  #[tokio::test]
  async fn patch_favorite_missing_flag_skips_store() {
    let (svc, store) = service();
    let before = store.calls();
    let err = svc
      .patch_favorite(ContactId::new(), None, &owner("u1"))
      .await
      .unwrap_err();
    assert!(matches!(err, Error::MissingFavorite));
    assert_eq!(store.calls(), before);
  }

  #[tokio::test]
  async fn patch_favorite_absent() {
    let (svc, _) = service();
    let c = svc.create(ann(), &owner("u1")).await.unwrap();
    assert_eq!(
      svc.patch_favorite(c.id, Some(true), &owner("u2")).await.unwrap(),
      None
    );
  }

  #[tokio::test]
  async fn store_failures_propagate() {
    let svc = ContactService::new(Arc::new(BrokenStore));
    let err = svc.list(&owner("u1")).await.unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert_eq!(err.to_string(), "store error: database unavailable");
  }
}
