//! Contact — the single resource kind managed by the service.
//!
//! A contact always belongs to exactly one owner. The owner is bound when the
//! contact is created and never changes afterwards; the same holds for the
//! contact's id.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Identity ────────────────────────────────────────────────────────────────

/// System-generated identifier of a contact.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
  /// Generate a fresh random id.
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for ContactId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl FromStr for ContactId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(Self)
  }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.hyphenated().fmt(f)
  }
}

/// Identity of an authenticated caller.
///
/// Produced by whatever authenticates the request; the core trusts it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for OwnerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A persisted contact as returned by every read and write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:       ContactId,
  pub owner_id: OwnerId,
  pub name:     String,
  pub email:    String,
  pub phone:    String,
  pub favorite: bool,
}

impl Contact {
  /// Build a contact from a validated payload, binding it to `owner` under a
  /// freshly generated id.
  pub fn new(input: NewContact, owner: OwnerId) -> Self {
    Self {
      id:       ContactId::new(),
      owner_id: owner,
      name:     input.name,
      email:    input.email,
      phone:    input.phone,
      favorite: input.favorite,
    }
  }

  /// Overwrite the fields present in `update`; absent fields keep their
  /// values. `id` and `owner_id` are never touched.
  pub fn apply(&mut self, update: &ContactUpdate) {
    if let Some(name) = &update.name {
      self.name.clone_from(name);
    }
    if let Some(email) = &update.email {
      self.email.clone_from(email);
    }
    if let Some(phone) = &update.phone {
      self.phone.clone_from(phone);
    }
    if let Some(favorite) = update.favorite {
      self.favorite = favorite;
    }
  }
}

// ─── Validated payloads ──────────────────────────────────────────────────────

/// A creation payload that has passed
/// [`validate_new_contact`](crate::validation::validate_new_contact).
///
/// Fields are private so the only way to obtain one is through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub(crate) name:     String,
  pub(crate) email:    String,
  pub(crate) phone:    String,
  pub(crate) favorite: bool,
}

impl NewContact {
  pub fn name(&self) -> &str { &self.name }

  pub fn email(&self) -> &str { &self.email }

  pub fn phone(&self) -> &str { &self.phone }

  pub fn favorite(&self) -> bool { self.favorite }
}

/// A partial update that has passed
/// [`validate_contact_update`](crate::validation::validate_contact_update).
///
/// At least one field is always set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactUpdate {
  pub(crate) name:     Option<String>,
  pub(crate) email:    Option<String>,
  pub(crate) phone:    Option<String>,
  pub(crate) favorite: Option<bool>,
}

impl ContactUpdate {
  /// An update that touches only the favorite flag.
  pub fn favorite_only(flag: bool) -> Self {
    Self {
      name:     None,
      email:    None,
      phone:    None,
      favorite: Some(flag),
    }
  }

  pub fn name(&self) -> Option<&str> { self.name.as_deref() }

  pub fn email(&self) -> Option<&str> { self.email.as_deref() }

  pub fn phone(&self) -> Option<&str> { self.phone.as_deref() }

  pub fn favorite(&self) -> Option<bool> { self.favorite }
}
