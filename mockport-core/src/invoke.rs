use crate::error::PortalError;
use crate::id::{self, ValidId};
use crate::log::{LogRecord, LogRecordInput};
use crate::repository::{LogStore, RouteRepository};
use crate::route::{HttpMethod, Route};
use crate::simulator::{self, InvocationOutcome};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The route fields echoed back to the caller of an invocation.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub id: Uuid,
    pub method: HttpMethod,
    pub path: String,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id,
            method: route.method,
            path: route.path.clone(),
        }
    }
}

/// A completed invocation: the simulated response and the record that logged it.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub route: RouteSummary,
    pub outcome: InvocationOutcome,
    pub record: LogRecord,
}

/// Runs the invocation path: validate → resolve → simulate → log.
///
/// Every step is sequential and the first failure ends the operation. The
/// log write is part of the call: an invocation whose record could not be
/// persisted is reported as failed.
#[derive(Clone)]
pub struct Invoker {
    routes: Arc<dyn RouteRepository>,
    logs: Arc<dyn LogStore>,
    storage_timeout: Duration,
}

impl Invoker {
    pub fn new(
        routes: Arc<dyn RouteRepository>,
        logs: Arc<dyn LogStore>,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            routes,
            logs,
            storage_timeout,
        }
    }

    pub fn routes(&self) -> &Arc<dyn RouteRepository> {
        &self.routes
    }

    pub fn logs(&self) -> &Arc<dyn LogStore> {
        &self.logs
    }

    /// Invoke the route identified by `raw_route_id`.
    pub async fn invoke(&self, raw_route_id: &str) -> Result<Invocation, PortalError> {
        let route_id = id::validate(raw_route_id)?;

        let route = self
            .bounded(self.routes.resolve_route(&route_id), PortalError::Query)
            .await?;

        if !route.enabled {
            debug!(route_id = %route.id, "Invocation rejected: route disabled");
            return Err(PortalError::RouteDisabled(route.id.to_string()));
        }

        let outcome = simulator::simulate(&route);
        let input = LogRecordInput::from_outcome(&route, &outcome);

        let record = match self.bounded(self.logs.append(input), PortalError::Write).await {
            Ok(record) => record,
            Err(e) => {
                warn!(route_id = %route.id, error = %e, "Invocation failed: log write");
                return Err(e);
            }
        };

        info!(
            route_id = %route.id,
            api_id = %route.api_id,
            method = route.method.as_str(),
            path = %route.path,
            status = outcome.status_code,
            latency_ms = outcome.latency_ms,
            "Route invoked"
        );

        Ok(Invocation {
            route: RouteSummary::from(&route),
            outcome,
            record,
        })
    }

    /// The most recent `limit` records of an api, newest first.
    pub async fn recent_logs(
        &self,
        raw_api_id: &str,
        limit: usize,
    ) -> Result<Vec<LogRecord>, PortalError> {
        let api_id = id::validate(raw_api_id)?;
        self.recent_logs_for(&api_id, limit).await
    }

    pub async fn recent_logs_for(
        &self,
        api_id: &ValidId,
        limit: usize,
    ) -> Result<Vec<LogRecord>, PortalError> {
        self.bounded(self.logs.recent(api_id, limit), PortalError::Query)
            .await
    }

    /// Bound a storage call; an elapsed timeout becomes the given error kind.
    async fn bounded<T, F>(
        &self,
        fut: F,
        on_timeout: fn(String) -> PortalError,
    ) -> Result<T, PortalError>
    where
        F: Future<Output = Result<T, PortalError>>,
    {
        match tokio::time::timeout(self.storage_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(on_timeout(format!(
                "storage call timed out after {} ms",
                self.storage_timeout.as_millis()
            ))),
        }
    }
}
