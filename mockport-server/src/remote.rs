//! Call-log reader backed by a running portal's HTTP API.

use async_trait::async_trait;
use mockport_core::error::PortalError;
use mockport_core::id::ValidId;
use mockport_core::log::LogRecord;
use mockport_core::repository::LogReader;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct LogPage {
    list: Vec<LogRecord>,
}

/// Reads recent records from `GET {base_url}/portal/apis/{id}/logs`.
pub struct HttpLogReader {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpLogReader {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LogReader for HttpLogReader {
    async fn recent(&self, api_id: &ValidId, limit: usize) -> Result<Vec<LogRecord>, PortalError> {
        let url = format!("{}/portal/apis/{}/logs?limit={}", self.base_url, api_id, limit);

        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PortalError::Query(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body["error"]
                .as_str()
                .map(str::to_owned)
                .unwrap_or_else(|| format!("portal answered {status}"));
            return Err(PortalError::Query(message));
        }

        let page: LogPage = response
            .json()
            .await
            .map_err(|e| PortalError::Query(format!("invalid log response: {e}")))?;

        debug!(api_id = %api_id, records = page.list.len(), "Fetched remote call log");
        Ok(page.list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockport_core::api::{Api, ApiStatus};
    use mockport_core::config::PortalConfig;
    use mockport_core::id;
    use mockport_core::route::{HttpMethod, Route};
    use mockport_observability::MetricsCollector;
    use mockport_portal::{PortalState, build_portal_router};
    use mockport_store::{CatalogCache, MemoryLogStore};
    use std::sync::Arc;
    use uuid::Uuid;

    const API_ID: &str = "5b1f0c3e-8f6a-4d2b-9c1e-7a3b2c1d0e9f";
    const ROUTE_ID: &str = "0d7e3c1a-2b4f-4e6a-8c9d-1f2e3a4b5c6d";

    fn state() -> Arc<PortalState> {
        let catalog = CatalogCache::new();
        catalog.insert_api(Api {
            id: Uuid::parse_str(API_ID).unwrap(),
            name: "Orders".into(),
            version: "1.0".into(),
            description: None,
            status: ApiStatus::Published,
            created_at: None,
        });
        catalog.insert_route(Route {
            id: Uuid::parse_str(ROUTE_ID).unwrap(),
            api_id: Uuid::parse_str(API_ID).unwrap(),
            method: HttpMethod::Get,
            path: "/orders".into(),
            enabled: true,
            status_code: Some(503),
            mock_response_json: None,
        });
        Arc::new(PortalState::new(
            &PortalConfig::default(),
            catalog,
            Arc::new(MemoryLogStore::new()),
            Arc::new(MetricsCollector::disabled()),
        ))
    }

    async fn serve(state: Arc<PortalState>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_portal_router(state)).await.unwrap();
        });
        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn reads_records_from_running_portal() {
        let state = state();
        for _ in 0..3 {
            state.invoker.invoke(ROUTE_ID).await.unwrap();
        }
        let reader = HttpLogReader::new(serve(Arc::clone(&state)).await);

        let api_id = id::validate(API_ID).unwrap();
        let records = reader.recent(&api_id, 2).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.status_code == 503));
        assert!(records[0].created_at >= records[1].created_at);
    }

    #[tokio::test]
    async fn unreachable_portal_is_query_error() {
        let reader = HttpLogReader::new("http://127.0.0.1:1")
            .with_timeout(Duration::from_millis(500));
        let api_id = id::validate(API_ID).unwrap();
        let err = reader.recent(&api_id, 10).await.unwrap_err();
        assert!(matches!(err, PortalError::Query(_)));
    }
}
