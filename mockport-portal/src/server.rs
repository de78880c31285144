use crate::handlers;
use axum::{
    Router as AxumRouter,
    extract::State,
    routing::{get, post},
};
use mockport_core::config::{MonitorConfig, PortalConfig, ServerConfig};
use mockport_core::invoke::Invoker;
use mockport_core::repository::{LogStore, RouteRepository};
use mockport_observability::MetricsCollector;
use mockport_store::{CatalogCache, MemoryLogStore};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the portal API.
pub struct PortalState {
    pub invoker: Invoker,
    pub catalog: CatalogCache,
    pub logs: Arc<MemoryLogStore>,
    pub monitor: MonitorConfig,
    pub metrics: Arc<MetricsCollector>,
    pub metrics_path: String,
}

impl PortalState {
    pub fn new(
        config: &PortalConfig,
        catalog: CatalogCache,
        logs: Arc<MemoryLogStore>,
        metrics: Arc<MetricsCollector>,
    ) -> Self {
        let routes: Arc<dyn RouteRepository> = Arc::new(catalog.clone());
        let store: Arc<dyn LogStore> = logs.clone();
        Self {
            invoker: Invoker::new(routes, store, config.store.timeout()),
            catalog,
            logs,
            monitor: config.monitor.clone(),
            metrics,
            metrics_path: config.observability.prometheus.path.clone(),
        }
    }
}

/// Build the portal router. Exposed for integration tests.
pub fn build_portal_router(state: Arc<PortalState>) -> AxumRouter {
    let metrics_path = state.metrics_path.clone();

    AxumRouter::new()
        // Invocation
        .route("/api/try", post(handlers::invoke::try_route_missing))
        .route("/api/try/", post(handlers::invoke::try_route_missing))
        .route("/api/try/{route_id}", post(handlers::invoke::try_route))
        // Catalog
        .route("/portal/apis", get(handlers::apis::list_apis))
        .route("/portal/apis/{id}", get(handlers::apis::get_api))
        .route("/portal/apis/{id}/routes", get(handlers::apis::list_api_routes))
        // Call log
        .route("/portal/apis/{id}/logs", get(handlers::logs::recent_logs))
        .route("/portal/apis/{id}/monitor", get(handlers::logs::monitor_snapshot))
        // Health and metrics
        .route("/health", get(handlers::health::health_check))
        .route(&metrics_path, get(metrics_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the portal API server.
pub async fn start_portal(config: ServerConfig, state: Arc<PortalState>) -> anyhow::Result<()> {
    if !config.enabled {
        info!("Portal API disabled");
        return Ok(());
    }

    let app = build_portal_router(state);

    info!(addr = %config.addr, "Starting portal API server");

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received, stopping portal API");
        })
        .await?;

    Ok(())
}

/// Prometheus metrics endpoint handler.
async fn metrics_handler(State(state): State<Arc<PortalState>>) -> String {
    state.metrics.render()
}
