use super::error_response;
use crate::server::PortalState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use mockport_core::id;
use serde_json::{Value, json};
use std::sync::Arc;

/// GET /portal/apis
pub async fn list_apis(State(state): State<Arc<PortalState>>) -> (StatusCode, Json<Value>) {
    match state.invoker.routes().list_published_apis().await {
        Ok(apis) => (
            StatusCode::OK,
            Json(json!({"list": apis, "total": apis.len()})),
        ),
        Err(e) => error_response(&e),
    }
}

/// GET /portal/apis/:id
pub async fn get_api(
    State(state): State<Arc<PortalState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let api_id = match id::validate(&id) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };
    match state.invoker.routes().resolve_api(&api_id).await {
        Ok(api) => (StatusCode::OK, Json(json!(api))),
        Err(e) => error_response(&e),
    }
}

/// GET /portal/apis/:id/routes
pub async fn list_api_routes(
    State(state): State<Arc<PortalState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let api_id = match id::validate(&id) {
        Ok(v) => v,
        Err(e) => return error_response(&e),
    };
    let repo = state.invoker.routes();
    if let Err(e) = repo.resolve_api(&api_id).await {
        return error_response(&e);
    }
    match repo.list_routes(&api_id).await {
        Ok(routes) => (
            StatusCode::OK,
            Json(json!({"list": routes, "total": routes.len()})),
        ),
        Err(e) => error_response(&e),
    }
}
