//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request failed validation; resending it unchanged will fail again.
  #[error(transparent)]
  InvalidRequest(explore_core::Error),

  /// Anything below validation failed. Callers may retry.
  #[error(transparent)]
  Unknown(explore_core::Error),
}

impl From<explore_core::Error> for ApiError {
  fn from(e: explore_core::Error) -> Self {
    if e.is_invalid_request() {
      ApiError::InvalidRequest(e)
    } else {
      ApiError::Unknown(e)
    }
  }
}

// Extractor failures are reported in the same JSON shape as validation.
impl From<QueryRejection> for ApiError {
  fn from(r: QueryRejection) -> Self {
    ApiError::InvalidRequest(explore_core::Error::InvalidRequest(vec![r.body_text()]))
  }
}

impl From<JsonRejection> for ApiError {
  fn from(r: JsonRejection) -> Self {
    ApiError::InvalidRequest(explore_core::Error::InvalidRequest(vec![r.body_text()]))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
