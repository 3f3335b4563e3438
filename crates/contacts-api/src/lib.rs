//! JSON REST API for contacts.
//!
//! Exposes an axum [`Router`] backed by any [`contacts_core::store::ContactStore`].
//! Authentication, TLS, and transport concerns are the caller's
//! responsibility: the router expects each request to carry an
//! [`OwnerId`](contacts_core::contact::OwnerId) extension, see [`owner`].
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", contacts_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;
pub mod owner;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use contacts_core::{service::ContactService, store::ContactStore};

pub use error::ApiError;
pub use owner::Owner;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::replace::<S>)
        .patch(contacts::patch_favorite::<S>)
        .delete(contacts::remove::<S>),
    )
    .route(
      "/contacts/{id}/favorite",
      patch(contacts::patch_favorite::<S>),
    )
    .with_state(ContactService::new(store))
}
