//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | `{"contacts":[...]}` |
//! | `GET`    | `/contacts/:id` | `{"contact":{...}}`; 404 if absent |
//! | `POST`   | `/contacts` | Body: `name`, `email`, `phone`, optional `favorite`; returns 201 |
//! | `DELETE` | `/contacts/:id` | 404 if absent |
//! | `PUT`    | `/contacts/:id` | Body: any non-empty subset of the mutable fields |
//! | `PATCH`  | `/contacts/:id`, `/contacts/:id/favorite` | Body: `{"favorite":bool}`; returns the bare contact |
//!
//! Every body passes through the validation gate before the service sees it.
//! A path id that is not a UUID names no contact, so it is reported as absent.

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use contacts_core::{
  contact::{Contact, ContactId},
  service::ContactService,
  store::ContactStore,
  validation::{validate_contact_update, validate_favorite_patch, validate_new_contact},
};
use serde_json::{Map, Value, json};

use crate::{error::ApiError, owner::Owner};

type Body = Result<Json<Value>, JsonRejection>;

fn parse_id(raw: &str) -> Option<ContactId> { raw.parse().ok() }

/// Parse a body without insisting on a JSON content type. An empty body reads
/// as `{}`, so a bare PATCH reaches the missing-flag check.
fn json_or_empty(bytes: &[u8]) -> Result<Value, ApiError> {
  if bytes.iter().all(u8::is_ascii_whitespace) {
    return Ok(Value::Object(Map::new()));
  }
  serde_json::from_slice(bytes)
    .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
}

fn not_found(raw: &str) -> ApiError {
  tracing::debug!(contact_id = %raw, "contact not found");
  ApiError::NotFound(format!("Contact with ID {raw} not found"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
pub async fn list<S>(
  State(service): State<ContactService<S>>,
  Owner(owner): Owner,
) -> Result<Json<Value>, ApiError>
where
  S: ContactStore,
{
  let contacts = service.list(&owner).await?;
  Ok(Json(json!({ "contacts": contacts })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(service): State<ContactService<S>>,
  Owner(owner): Owner,
  Path(raw): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: ContactStore,
{
  let contact = match parse_id(&raw) {
    Some(id) => service.get_by_id(id, &owner).await?,
    None => None,
  };
  let contact = contact.ok_or_else(|| not_found(&raw))?;
  Ok(Json(json!({ "contact": contact })))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`: returns 201 and the stored contact under
/// `data.newContact`.
pub async fn create<S>(
  State(service): State<ContactService<S>>,
  Owner(owner): Owner,
  body: Body,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
{
  let Json(body) = body?;
  let input = validate_new_contact(&body)?;
  let contact = service.create(input, &owner).await?;
  tracing::debug!(contact_id = %contact.id, owner = %owner, "contact created");
  Ok((
    StatusCode::CREATED,
    Json(json!({
      "status": "success",
      "code":   201,
      "data":   { "newContact": contact },
    })),
  ))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn remove<S>(
  State(service): State<ContactService<S>>,
  Owner(owner): Owner,
  Path(raw): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: ContactStore,
{
  let removed = match parse_id(&raw) {
    Some(id) => service.remove(id, &owner).await?,
    None => None,
  };
  removed.ok_or_else(|| not_found(&raw))?;
  Ok(Json(json!({ "message": format!("Contact with ID {raw} deleted") })))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id`: only the fields present in the body change.
pub async fn replace<S>(
  State(service): State<ContactService<S>>,
  Owner(owner): Owner,
  Path(raw): Path<String>,
  body: Body,
) -> Result<Response, ApiError>
where
  S: ContactStore,
{
  let Json(body) = body?;
  let update = validate_contact_update(&body)?;

  let updated = match parse_id(&raw) {
    Some(id) => service.replace(id, update, &owner).await?,
    None => None,
  };

  let response = match updated {
    Some(contact) => Json(json!({
      "status":  "success",
      "data":    { "contactToEdit": contact },
      "message": "Contact has been updated successfully",
    }))
    .into_response(),
    None => {
      tracing::debug!(contact_id = %raw, "contact not found");
      (
        StatusCode::NOT_FOUND,
        Json(json!({ "code": 404, "message": "Not found" })),
      )
        .into_response()
    }
  };
  Ok(response)
}

// ─── Favorite ─────────────────────────────────────────────────────────────────

/// `PATCH /contacts/:id[/favorite]`, body: `{"favorite":true}`.
///
/// A missing flag, including an empty body, is rejected with 400 before any
/// lookup.
pub async fn patch_favorite<S>(
  State(service): State<ContactService<S>>,
  Owner(owner): Owner,
  Path(raw): Path<String>,
  bytes: Bytes,
) -> Result<Response, ApiError>
where
  S: ContactStore,
{
  let body = json_or_empty(&bytes)?;
  let favorite = validate_favorite_patch(&body)?;

  let updated: Option<Contact> = match parse_id(&raw) {
    Some(id) => service.patch_favorite(id, favorite, &owner).await?,
    None if favorite.is_none() => return Err(ApiError::MissingFavorite),
    None => None,
  };

  let response = match updated {
    Some(contact) => Json(contact).into_response(),
    None => {
      tracing::debug!(contact_id = %raw, "contact not found");
      (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response()
    }
  };
  Ok(response)
}
