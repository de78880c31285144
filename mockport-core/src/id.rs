use crate::error::{InvalidIdReason, PortalError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Canonical hyphenated UUID, version nibble 1-5, variant nibble 8/9/a/b.
static UUID_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid shape regex is valid")
});

/// Literal that unresolved template routes hand over instead of an id.
pub const PLACEHOLDER: &str = "undefined";

/// An identifier that passed [`validate`]. Only values of this type reach storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidId(Uuid);

impl ValidId {
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ValidId {
    fn from(id: Uuid) -> Self {
        ValidId(id)
    }
}

impl std::fmt::Display for ValidId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for ValidId {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

/// Validate a caller-supplied identifier before any lookup.
pub fn validate(candidate: &str) -> Result<ValidId, PortalError> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return Err(PortalError::invalid_id(InvalidIdReason::Missing, candidate));
    }
    if trimmed == PLACEHOLDER {
        return Err(PortalError::invalid_id(InvalidIdReason::Placeholder, candidate));
    }
    if !UUID_SHAPE.is_match(trimmed) {
        return Err(PortalError::invalid_id(InvalidIdReason::Malformed, candidate));
    }
    Uuid::parse_str(trimmed)
        .map(ValidId)
        .map_err(|_| PortalError::invalid_id(InvalidIdReason::Malformed, candidate))
}
