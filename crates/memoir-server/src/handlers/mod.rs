//! HTTP handlers

pub mod debug;
pub mod health;
pub mod storage;

pub use health::health;

use axum::{http::StatusCode, Json};
use memoir_types::ErrorResponse;
use serde_json::Value;

/// Non-2xx answer carrying the `{error, details}` envelope
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn failure(status: StatusCode, error: &str, details: impl Into<Value>) -> ApiError {
    (status, Json(ErrorResponse::new(error, details)))
}
