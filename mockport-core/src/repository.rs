//! Storage seams. The catalog and the call log live behind these traits so
//! the invocation path and the monitor never depend on a concrete store.

use crate::api::Api;
use crate::error::PortalError;
use crate::id::ValidId;
use crate::log::{LogRecord, LogRecordInput};
use crate::route::Route;
use async_trait::async_trait;

/// Read-only access to Apis and their Routes.
#[async_trait]
pub trait RouteRepository: Send + Sync {
    /// Resolve a single route. `RouteNotFound` when no row matches.
    async fn resolve_route(&self, id: &ValidId) -> Result<Route, PortalError>;

    /// Routes of an api ordered by (method, path).
    async fn list_routes(&self, api_id: &ValidId) -> Result<Vec<Route>, PortalError>;

    /// Resolve an api regardless of its status. `ApiNotFound` when absent.
    async fn resolve_api(&self, id: &ValidId) -> Result<Api, PortalError>;

    /// Published, well-formed apis, newest first.
    async fn list_published_apis(&self) -> Result<Vec<Api>, PortalError>;
}

/// Append side of the call log.
#[async_trait]
pub trait LogWriter: Send + Sync {
    /// Persist a record, assigning `id` and `created_at`. Failures surface as `Write`.
    async fn append(&self, input: LogRecordInput) -> Result<LogRecord, PortalError>;
}

/// Read side of the call log.
#[async_trait]
pub trait LogReader: Send + Sync {
    /// At most `limit` records of `api_id`, newest first. Failures surface as `Query`.
    async fn recent(&self, api_id: &ValidId, limit: usize) -> Result<Vec<LogRecord>, PortalError>;
}

/// A full log store: both sides.
pub trait LogStore: LogWriter + LogReader {}

impl<T: LogWriter + LogReader> LogStore for T {}
