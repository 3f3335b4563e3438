//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `contacts-store-sqlite`). The access service depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::contact::{Contact, ContactId, ContactUpdate, OwnerId};

/// Abstraction over a contacts persistence backend.
///
/// Every method that reads or mutates an existing contact takes the owner and
/// must match on `id` and `owner` jointly. A contact owned by someone else is
/// reported exactly like a missing one: `Ok(None)`.
///
/// [`find_and_update`](Self::find_and_update) and
/// [`find_and_delete`](Self::find_and_delete) must each be a single atomic
/// step; a separate existence check followed by a write is not allowed.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All contacts owned by `owner`, in storage order.
  fn list(
    &self,
    owner: OwnerId,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  /// The contact with `id`, if `owner` owns it.
  fn find(
    &self,
    id: ContactId,
    owner: OwnerId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Persist a fully-built contact and return it as stored.
  fn insert(
    &self,
    contact: Contact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Apply `update` to the contact matching `id` and `owner` and return the
  /// new state.
  fn find_and_update(
    &self,
    id: ContactId,
    owner: OwnerId,
    update: ContactUpdate,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Delete the contact matching `id` and `owner` and return its prior state.
  fn find_and_delete(
    &self,
    id: ContactId,
    owner: OwnerId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;
}
