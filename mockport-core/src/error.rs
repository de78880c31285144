use http::StatusCode;
use serde_json::{Value, json};
use thiserror::Error;

/// Why a candidate identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidIdReason {
    /// Empty or whitespace-only input.
    Missing,
    /// The literal `undefined` leaked from an unresolved template route.
    Placeholder,
    /// Anything that is not a canonical hyphenated UUID.
    Malformed,
}

impl std::fmt::Display for InvalidIdReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvalidIdReason::Missing => "missing",
            InvalidIdReason::Placeholder => "placeholder",
            InvalidIdReason::Malformed => "malformed",
        };
        f.write_str(s)
    }
}

/// Unified error type for mockport.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Invalid id ({reason}): \"{value}\"")]
    InvalidId {
        reason: InvalidIdReason,
        value: String,
    },

    #[error("API not found: {0}")]
    ApiNotFound(String),

    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Route disabled: {0}")]
    RouteDisabled(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Log write failed: {0}")]
    Write(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Internal: {0}")]
    Internal(String),
}

impl PortalError {
    pub fn invalid_id(reason: InvalidIdReason, value: impl Into<String>) -> Self {
        PortalError::InvalidId {
            reason,
            value: value.into(),
        }
    }

    /// Map to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            PortalError::ApiNotFound(_) | PortalError::RouteNotFound(_) => StatusCode::NOT_FOUND,
            PortalError::RouteDisabled(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_invalid_id(&self) -> bool {
        matches!(self, PortalError::InvalidId { .. })
    }

    /// JSON error body.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.to_string(),
            "status": self.status_code().as_u16(),
        })
    }
}
