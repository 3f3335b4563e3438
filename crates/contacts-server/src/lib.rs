//! HTTP server wiring for the contacts API.
//!
//! Puts [`contacts_api::api_router`] under `/api`, behind HTTP Basic
//! authentication. The authenticated username is the owner every contact
//! operation is scoped to.

pub mod auth;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::{Router, middleware};
use contacts_core::store::ContactStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  #[serde(default)]
  pub users:      Vec<UserConfig>,
}

impl ServerConfig {
  /// Read `path` (if it exists) and overlay `CONTACTS_*` environment
  /// variables, e.g. `CONTACTS_PORT=8080`. Unset keys take their defaults:
  /// `127.0.0.1:3000` and `contacts.db` in the working directory.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("store_path", "contacts.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CONTACTS"))
      .build()
      .with_context(|| format!("reading {}", path.display()))?
      .try_deserialize()
      .context("invalid server configuration")
  }

  /// `store_path` with a leading `~/` resolved against `$HOME`.
  pub fn database_path(&self) -> PathBuf {
    match (self.store_path.strip_prefix("~"), std::env::var_os("HOME")) {
      (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
      _ => self.store_path.clone(),
    }
  }
}

/// One account allowed to sign in; its username is its owner id.
#[derive(Deserialize, Clone)]
pub struct UserConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(store: Arc<S>, auth: Arc<AuthConfig>) -> Router
where
  S: ContactStore + 'static,
{
  Router::new()
    .nest("/api", contacts_api::api_router(store))
    .layer(middleware::from_fn_with_state(auth, auth::require_owner))
    .layer(TraceLayer::new_for_http())
}
