use crate::server::PortalState;
use axum::extract::State;
use axum::response::Json;
use serde_json::{Value, json};
use std::sync::Arc;

pub async fn health_check(State(state): State<Arc<PortalState>>) -> Json<Value> {
    let stats = state.catalog.stats();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog": {
            "apis": stats.apis,
            "routes": stats.routes,
        },
        "logs": state.logs.len(),
    }))
}
