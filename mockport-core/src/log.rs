//! Call records written once per successful invocation.
//!
//! Method, path and status are copied from the route at invocation time so
//! the log stays an accurate trail of what was returned, whatever happens to
//! the route later.

use crate::route::Route;
use crate::simulator::InvocationOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted call record. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub api_id: Uuid,
    pub route_id: Uuid,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub latency_ms: u32,
}

/// A record before the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecordInput {
    pub api_id: Uuid,
    pub route_id: Uuid,
    pub method: String,
    pub path: String,
    pub status_code: u16,
    pub latency_ms: u32,
}

impl LogRecordInput {
    pub fn from_outcome(route: &Route, outcome: &InvocationOutcome) -> Self {
        Self {
            api_id: route.api_id,
            route_id: route.id,
            method: route.method.as_str().to_string(),
            path: route.path.clone(),
            status_code: outcome.status_code,
            latency_ms: outcome.latency_ms,
        }
    }

    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> LogRecord {
        LogRecord {
            id,
            created_at,
            api_id: self.api_id,
            route_id: self.route_id,
            method: self.method,
            path: self.path,
            status_code: self.status_code,
            latency_ms: self.latency_ms,
        }
    }
}

impl LogRecord {
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}
