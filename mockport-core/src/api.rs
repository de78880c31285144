use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A mock API published in the portal. Owned by the management process;
/// read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Api {
    pub id: Uuid,

    pub name: String,

    pub version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub status: ApiStatus,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Publication lifecycle of an Api.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    #[default]
    Draft,
    Published,
    Deprecated,
}

impl Api {
    pub fn is_published(&self) -> bool {
        self.status == ApiStatus::Published
    }

    /// Published and carrying the fields the portal list needs.
    pub fn is_listable(&self) -> bool {
        self.is_published()
            && !self.id.is_nil()
            && !self.name.trim().is_empty()
            && !self.version.trim().is_empty()
    }
}
