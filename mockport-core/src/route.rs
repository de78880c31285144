use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use uuid::Uuid;

/// A simulated endpoint belonging to an Api.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Unique route identifier
    pub id: Uuid,

    /// Owning Api
    pub api_id: Uuid,

    /// HTTP method shown to users and copied into log records
    pub method: HttpMethod,

    /// Display path, e.g. `/v1/orders/{id}`
    pub path: String,

    /// Disabled routes reject invocation
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Status code returned by the simulator (200 when absent)
    #[serde(default)]
    pub status_code: Option<u16>,

    /// Body returned by the simulator (`{"message":"ok"}` when absent)
    #[serde(default)]
    pub mock_response_json: Option<serde_json::Value>,
}

/// HTTP methods supported by routes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Route {
    /// Display order: method text ascending, then path ascending.
    pub fn display_order(a: &Route, b: &Route) -> Ordering {
        a.method
            .as_str()
            .cmp(b.method.as_str())
            .then_with(|| a.path.cmp(&b.path))
    }
}

fn default_enabled() -> bool {
    true
}
