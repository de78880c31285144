use super::error_response;
use crate::server::PortalState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use mockport_observability::MonitorView;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<usize>,
}

/// GET /portal/apis/:id/logs?limit=N
pub async fn recent_logs(
    State(state): State<Arc<PortalState>>,
    Path(id): Path<String>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> (StatusCode, Json<Value>) {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("Invalid limit: {}", rejection.body_text())})),
            );
        }
    };
    let limit = state.monitor.effective_limit(query.limit);
    match state.invoker.recent_logs(&id, limit).await {
        Ok(records) => (
            StatusCode::OK,
            Json(json!({"list": records, "total": records.len()})),
        ),
        Err(e) => error_response(&e),
    }
}

/// GET /portal/apis/:id/monitor
///
/// One monitor refresh over the configured window.
pub async fn monitor_snapshot(
    State(state): State<Arc<PortalState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let result = state.invoker.recent_logs(&id, state.monitor.window).await;
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status_code(),
    };
    let view = MonitorView::from_fetch(result);
    (status, Json(json!(view)))
}
