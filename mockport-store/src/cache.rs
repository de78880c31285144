use async_trait::async_trait;
use dashmap::DashMap;
use mockport_core::api::Api;
use mockport_core::error::PortalError;
use mockport_core::id::ValidId;
use mockport_core::repository::RouteRepository;
use mockport_core::route::Route;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// In-memory catalog of Apis and Routes.
///
/// Populated once from the catalog file at startup; the invocation path and
/// the portal read from here and never write.
#[derive(Clone)]
pub struct CatalogCache {
    pub apis: Arc<DashMap<Uuid, Api>>,
    pub routes: Arc<DashMap<Uuid, Route>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self {
            apis: Arc::new(DashMap::new()),
            routes: Arc::new(DashMap::new()),
        }
    }

    /// Insert an api during catalog load.
    pub fn insert_api(&self, api: Api) {
        debug!(resource = "api", id = %api.id, "Catalog loaded");
        self.apis.insert(api.id, api);
    }

    /// Insert a route during catalog load.
    pub fn insert_route(&self, route: Route) {
        debug!(resource = "route", id = %route.id, api_id = %route.api_id, "Catalog loaded");
        self.routes.insert(route.id, route);
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            apis: self.apis.len(),
            routes: self.routes.len(),
        }
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RouteRepository for CatalogCache {
    async fn resolve_route(&self, id: &ValidId) -> Result<Route, PortalError> {
        self.routes
            .get(id.as_uuid())
            .map(|r| r.value().clone())
            .ok_or_else(|| PortalError::RouteNotFound(id.to_string()))
    }

    async fn list_routes(&self, api_id: &ValidId) -> Result<Vec<Route>, PortalError> {
        let mut routes: Vec<Route> = self
            .routes
            .iter()
            .filter(|r| &r.value().api_id == api_id.as_uuid())
            .map(|r| r.value().clone())
            .collect();
        routes.sort_by(Route::display_order);
        Ok(routes)
    }

    async fn resolve_api(&self, id: &ValidId) -> Result<Api, PortalError> {
        self.apis
            .get(id.as_uuid())
            .map(|a| a.value().clone())
            .ok_or_else(|| PortalError::ApiNotFound(id.to_string()))
    }

    async fn list_published_apis(&self) -> Result<Vec<Api>, PortalError> {
        let mut apis: Vec<Api> = self
            .apis
            .iter()
            .filter(|a| a.value().is_listable())
            .map(|a| a.value().clone())
            .collect();
        // Newest first with undated apis ahead of dated ones (NULLS FIRST in a
        // descending order), ties by name for a stable listing.
        apis.sort_by(|a, b| {
            b.created_at
                .is_none()
                .cmp(&a.created_at.is_none())
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(apis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub apis: usize,
    pub routes: usize,
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "apis={}, routes={}", self.apis, self.routes)
    }
}
