//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use contacts_core::validation::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("missing field favorite")]
  MissingFavorite,

  #[error("not authorized")]
  Unauthorized,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<contacts_core::Error> for ApiError {
  fn from(e: contacts_core::Error) -> Self {
    match e {
      contacts_core::Error::MissingFavorite => ApiError::MissingFavorite,
      contacts_core::Error::Store(e) => ApiError::Store(e),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(message) => {
        (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
      }
      ApiError::BadRequest(message) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
      }
      ApiError::Validation(v) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": v.to_string(), "errors": v.errors })),
      )
        .into_response(),
      ApiError::MissingFavorite => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "missing field favorite" })),
      )
        .into_response(),
      ApiError::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "message": "Not authorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"contacts\""),
        );
        res
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
