use crate::server::PortalState;
use axum::extract::{OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use mockport_core::error::PortalError;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

/// POST /api/try/:route_id
pub async fn try_route(
    State(state): State<Arc<PortalState>>,
    OriginalUri(uri): OriginalUri,
    Path(route_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    handle_try(&state, uri.path(), &route_id).await
}

/// POST /api/try and /api/try/
pub async fn try_route_missing(
    State(state): State<Arc<PortalState>>,
    OriginalUri(uri): OriginalUri,
) -> (StatusCode, Json<Value>) {
    handle_try(&state, uri.path(), "").await
}

/// Segment following `try` in the request path, or "" when absent.
pub fn route_id_from_path(path: &str) -> &str {
    let mut parts = path.split('/').filter(|p| !p.is_empty());
    match parts.by_ref().position(|p| p == "try") {
        Some(_) => parts.next().unwrap_or(""),
        None => "",
    }
}

async fn handle_try(state: &PortalState, req_path: &str, from_params: &str) -> (StatusCode, Json<Value>) {
    let from_url = route_id_from_path(req_path);
    let candidate = if from_url.is_empty() { from_params } else { from_url };

    match state.invoker.invoke(candidate).await {
        Ok(done) => {
            state.metrics.record_invocation(
                &done.route.id.to_string(),
                done.route.method.as_str(),
                done.outcome.status_code,
                done.outcome.latency_ms,
            );
            (
                StatusCode::OK,
                Json(json!({
                    "ok": true,
                    "route": done.route,
                    "latency_ms": done.outcome.latency_ms,
                    "status_code": done.outcome.status_code,
                    "response": done.outcome.body,
                })),
            )
        }
        Err(e @ PortalError::InvalidId { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": e.to_string(),
                "debug": {
                    "req_path": req_path,
                    "parsed_from_url": from_url,
                    "from_params": from_params,
                },
            })),
        ),
        Err(PortalError::RouteDisabled(id)) => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Route disabled", "routeId": id})),
        ),
        Err(e @ PortalError::RouteNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": e.to_string(), "routeId": candidate.trim()})),
        ),
        Err(PortalError::Write(detail)) => {
            state.metrics.record_log_write_failure();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to write log", "detail": detail})),
            )
        }
        Err(e) => {
            warn!(route_id = %candidate, error = %e, "Route lookup failed");
            (
                e.status_code(),
                Json(json!({"error": "Route lookup failed", "detail": e.to_string()})),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_id_is_the_segment_after_try() {
        assert_eq!(route_id_from_path("/api/try/abc"), "abc");
        assert_eq!(route_id_from_path("/api/try/abc/extra"), "abc");
        assert_eq!(route_id_from_path("//api//try//abc"), "abc");
    }

    #[test]
    fn missing_segment_is_empty() {
        assert_eq!(route_id_from_path("/api/try"), "");
        assert_eq!(route_id_from_path("/api/try/"), "");
        assert_eq!(route_id_from_path("/portal/apis"), "");
        assert_eq!(route_id_from_path(""), "");
    }
}
