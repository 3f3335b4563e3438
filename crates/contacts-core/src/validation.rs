//! The validation gate.
//!
//! Turns an already-parsed JSON body into one of the validated payload types.
//! Nothing here knows about owners, ids or storage; a payload is judged on its
//! own shape. Every failing field is reported, in the order `name`, `email`,
//! `phone`, `favorite`.
//!
//! Keys other than the four mutable fields are ignored, so a caller cannot
//! smuggle in an `id` or `ownerId`.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::contact::{ContactUpdate, NewContact};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)*\.[A-Za-z]{2,}$")
    .expect("email pattern compiles")
});

// ─── Errors ──────────────────────────────────────────────────────────────────

/// One rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field:  String,
  pub reason: String,
}

/// A payload rejected by the gate. Always holds at least one [`FieldError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
  pub errors: Vec<FieldError>,
}

impl ValidationError {
  fn single(field: &str, reason: &str) -> Self {
    Self { errors: vec![FieldError { field: field.into(), reason: reason.into() }] }
  }

  /// Whether `field` is among the rejected fields.
  pub fn has_field(&self, field: &str) -> bool {
    self.errors.iter().any(|e| e.field == field)
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, e) in self.errors.iter().enumerate() {
      if i > 0 {
        f.write_str("; ")?;
      }
      write!(f, "{} {}", e.field, e.reason)?;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationError {}

// ─── Field checks ────────────────────────────────────────────────────────────

#[derive(Default)]
struct Collector {
  errors: Vec<FieldError>,
}

impl Collector {
  fn reject(&mut self, field: &str, reason: &str) {
    self.errors.push(FieldError { field: field.into(), reason: reason.into() });
  }

  /// A non-empty text field. `null` counts as absent.
  fn text(&mut self, body: &Map<String, Value>, field: &str, required: bool) -> Option<String> {
    match body.get(field) {
      None | Some(Value::Null) => {
        if required {
          self.reject(field, "is required");
        }
        None
      }
      Some(Value::String(s)) => {
        let trimmed = s.trim();
        if trimmed.is_empty() {
          self.reject(field, "must not be empty");
          None
        } else {
          Some(trimmed.to_owned())
        }
      }
      Some(_) => {
        self.reject(field, "must be a string");
        None
      }
    }
  }

  fn email(&mut self, body: &Map<String, Value>, required: bool) -> Option<String> {
    let email = self.text(body, "email", required)?;
    if EMAIL_RE.is_match(&email) {
      Some(email)
    } else {
      self.reject("email", "must be a valid email address");
      None
    }
  }

  fn favorite(&mut self, body: &Map<String, Value>) -> Option<bool> {
    match body.get("favorite") {
      None | Some(Value::Null) => None,
      Some(Value::Bool(b)) => Some(*b),
      Some(_) => {
        self.reject("favorite", "must be a boolean");
        None
      }
    }
  }

  fn finish(self) -> Result<(), ValidationError> {
    if self.errors.is_empty() {
      Ok(())
    } else {
      Err(ValidationError { errors: self.errors })
    }
  }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
  payload
    .as_object()
    .ok_or_else(|| ValidationError::single("body", "must be a JSON object"))
}

// ─── Gate operations ─────────────────────────────────────────────────────────

/// Validate a creation payload. `name`, `email` and `phone` are required;
/// `favorite` defaults to `false`.
pub fn validate_new_contact(payload: &Value) -> Result<NewContact, ValidationError> {
  let body = as_object(payload)?;
  let mut c = Collector::default();

  let name = c.text(body, "name", true);
  let email = c.email(body, true);
  let phone = c.text(body, "phone", true);
  let favorite = c.favorite(body);
  c.finish()?;

  match (name, email, phone) {
    (Some(name), Some(email), Some(phone)) => Ok(NewContact {
      name,
      email,
      phone,
      favorite: favorite.unwrap_or(false),
    }),
    // Every `None` above also recorded a rejection.
    _ => Err(ValidationError::single("body", "is incomplete")),
  }
}

/// Validate a partial update. Every field is optional, but at least one must
/// be present.
pub fn validate_contact_update(payload: &Value) -> Result<ContactUpdate, ValidationError> {
  let body = as_object(payload)?;
  let mut c = Collector::default();

  let update = ContactUpdate {
    name:     c.text(body, "name", false),
    email:    c.email(body, false),
    phone:    c.text(body, "phone", false),
    favorite: c.favorite(body),
  };
  c.finish()?;

  if update.name.is_none()
    && update.email.is_none()
    && update.phone.is_none()
    && update.favorite.is_none()
  {
    return Err(ValidationError::single(
      "body",
      "must contain at least one of name, email, phone, favorite",
    ));
  }
  Ok(update)
}

/// Extract the flag of a favorite-only update.
///
/// A missing or `null` flag is not a validation failure here: it yields
/// `Ok(None)` so the access service can report it as its own error. Any other
/// mutable field present must still be well-formed, although only the flag is
/// ever applied.
pub fn validate_favorite_patch(payload: &Value) -> Result<Option<bool>, ValidationError> {
  let body = as_object(payload)?;
  let mut c = Collector::default();
  c.text(body, "name", false);
  c.email(body, false);
  c.text(body, "phone", false);
  let favorite = c.favorite(body);
  c.finish()?;
  Ok(favorite)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn new_contact_defaults_favorite() {
    let nc = validate_new_contact(&json!({
      "name": "Ann", "email": "ann@x.com", "phone": "123"
    }))
    .unwrap();
    assert_eq!(nc.name(), "Ann");
    assert_eq!(nc.email(), "ann@x.com");
    assert_eq!(nc.phone(), "123");
    assert!(!nc.favorite());
  }

  #[test]
  fn new_contact_keeps_explicit_favorite() {
    let nc = validate_new_contact(&json!({
      "name": "Ann", "email": "ann@x.com", "phone": "123", "favorite": true
    }))
    .unwrap();
    assert!(nc.favorite());
  }

  #[test]
  fn new_contact_trims_text() {
    let nc = validate_new_contact(&json!({
      "name": "  Ann ", "email": "ann@x.com", "phone": " 123"
    }))
    .unwrap();
    assert_eq!(nc.name(), "Ann");
    assert_eq!(nc.phone(), "123");
  }

  #[test]
  fn new_contact_missing_name() {
    let err = validate_new_contact(&json!({ "email": "ann@x.com", "phone": "123" }))
      .unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert!(err.has_field("name"));
  }

  #[test]
  fn new_contact_missing_email() {
    let err = validate_new_contact(&json!({ "name": "Ann", "phone": "123" })).unwrap_err();
    assert!(err.has_field("email"));
  }

  #[test]
  fn new_contact_malformed_email() {
    for bad in ["not-an-email", "a@b", "a b@x.com", "@x.com", "ann@.com"] {
      let err = validate_new_contact(&json!({
        "name": "Ann", "email": bad, "phone": "123"
      }))
      .unwrap_err();
      assert!(err.has_field("email"), "{bad} should be rejected");
    }
  }

  #[test]
  fn new_contact_accepts_subdomains() {
    assert!(
      validate_new_contact(&json!({
        "name": "Ann", "email": "ann.lee+x@mail.example.co.uk", "phone": "123"
      }))
      .is_ok()
    );
  }

  #[test]
  fn new_contact_reports_all_failures_in_order() {
    let err = validate_new_contact(&json!({
      "name": "", "email": 7, "favorite": "yes"
    }))
    .unwrap_err();
    let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["name", "email", "phone", "favorite"]);
  }

  #[test]
  fn new_contact_rejects_non_object() {
    let err = validate_new_contact(&json!(["Ann"])).unwrap_err();
    assert!(err.has_field("body"));
  }

  #[test]
  fn update_accepts_single_field() {
    let u = validate_contact_update(&json!({ "phone": "555" })).unwrap();
    assert_eq!(u.phone(), Some("555"));
    assert_eq!(u.name(), None);
    assert_eq!(u.favorite(), None);
  }

  #[test]
  fn update_rejects_empty_payload() {
    let err = validate_contact_update(&json!({})).unwrap_err();
    assert!(err.has_field("body"));
  }

  #[test]
  fn update_ignores_identity_keys() {
    let err = validate_contact_update(&json!({ "id": "x", "ownerId": "u2" })).unwrap_err();
    assert!(err.has_field("body"));

    let u = validate_contact_update(&json!({ "ownerId": "u2", "name": "X" })).unwrap();
    assert_eq!(u.name(), Some("X"));
  }

  #[test]
  fn update_checks_formats() {
    let err = validate_contact_update(&json!({ "email": "nope", "favorite": 1 })).unwrap_err();
    assert!(err.has_field("email"));
    assert!(err.has_field("favorite"));
  }

  #[test]
  fn favorite_patch_missing_is_none() {
    assert_eq!(validate_favorite_patch(&json!({})).unwrap(), None);
    assert_eq!(validate_favorite_patch(&json!({ "favorite": null })).unwrap(), None);
    assert_eq!(
      validate_favorite_patch(&json!({ "favorite": true, "name": "ignored" })).unwrap(),
      Some(true)
    );
  }

  #[test]
  fn favorite_patch_checks_other_fields() {
    let err = validate_favorite_patch(&json!({ "favorite": true, "email": "bad" })).unwrap_err();
    assert!(err.has_field("email"));
    assert!(!err.has_field("favorite"));

    let err = validate_favorite_patch(&json!({ "phone": "" })).unwrap_err();
    assert!(err.has_field("phone"));
  }

  #[test]
  fn favorite_patch_rejects_non_bool() {
    let err = validate_favorite_patch(&json!({ "favorite": "true" })).unwrap_err();
    assert!(err.has_field("favorite"));
  }
}
