//! Extractor for the authenticated caller.
//!
//! Authentication itself happens outside this crate: whatever layer verifies
//! the request inserts an [`OwnerId`] into the request extensions. Handlers
//! that take an [`Owner`] never run without one.

use axum::{extract::FromRequestParts, http::request::Parts};
use contacts_core::contact::OwnerId;

use crate::error::ApiError;

/// The caller every operation is scoped to.
#[derive(Debug, Clone)]
pub struct Owner(pub OwnerId);

impl<St> FromRequestParts<St> for Owner
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<OwnerId>()
      .cloned()
      .map(Owner)
      .ok_or(ApiError::Unauthorized)
  }
}
