pub mod apis;
pub mod health;
pub mod invoke;
pub mod logs;

use axum::http::StatusCode;
use axum::response::Json;
use mockport_core::error::PortalError;
use serde_json::{Value, json};

/// `{ error }` body with the status the error maps to.
pub(crate) fn error_response(e: &PortalError) -> (StatusCode, Json<Value>) {
    (e.status_code(), Json(json!({ "error": e.to_string() })))
}
