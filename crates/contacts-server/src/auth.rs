//! HTTP Basic-auth middleware and standalone verifier.
//!
//! A verified username becomes the request's [`OwnerId`]; the API layer reads
//! it back through [`contacts_api::Owner`].

use std::{collections::HashMap, sync::Arc};

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{Request, State},
  http::HeaderMap,
  middleware::Next,
  response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use contacts_api::ApiError;
use contacts_core::contact::OwnerId;

use crate::UserConfig;

/// Credentials accepted as valid for this server instance.
#[derive(Clone, Default)]
pub struct AuthConfig {
  /// Username to PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  users: HashMap<String, String>,
}

impl AuthConfig {
  pub fn from_users(users: &[UserConfig]) -> Self {
    Self {
      users: users
        .iter()
        .map(|u| (u.username.clone(), u.password_hash.clone()))
        .collect(),
    }
  }
}

/// Verify credentials from headers and return the caller's identity.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<OwnerId, ApiError> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  let hash = config.users.get(username).ok_or(ApiError::Unauthorized)?;

  let parsed_hash = PasswordHash::new(hash).map_err(|_| ApiError::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| ApiError::Unauthorized)?;

  Ok(OwnerId::new(username))
}

/// Middleware: reject unauthenticated requests, otherwise attach the
/// [`OwnerId`] extension and continue.
pub async fn require_owner(
  State(auth): State<Arc<AuthConfig>>,
  mut req: Request,
  next: Next,
) -> Response {
  match verify_auth(req.headers(), &auth) {
    Ok(owner) => {
      req.extensions_mut().insert(owner);
      next.run(req).await
    }
    Err(e) => {
      tracing::debug!(path = %req.uri().path(), "rejected unauthenticated request");
      e.into_response()
    }
  }
}
