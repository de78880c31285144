//! Catalog file loading.
//!
//! The catalog (apis + routes) is maintained by an external management
//! process and handed to mockport as a YAML or JSON file. It is read once at
//! startup into the [`CatalogCache`]; mockport never writes it back.
//!
//! ```yaml
//! apis:
//!   - id: 5b1f0c3e-8f6a-4d2b-9c1e-7a3b2c1d0e9f
//!     name: Orders
//!     version: "1.0"
//!     status: published
//! routes:
//!   - id: 0d7e3c1a-2b4f-4e6a-8c9d-1f2e3a4b5c6d
//!     api_id: 5b1f0c3e-8f6a-4d2b-9c1e-7a3b2c1d0e9f
//!     method: GET
//!     path: /orders
//!     mock_response_json: { orders: [] }
//! ```

use crate::cache::{CatalogCache, CatalogStats};
use anyhow::Context;
use mockport_core::api::Api;
use mockport_core::route::Route;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The shape deserialized from the catalog file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PersistedCatalog {
    #[serde(default)]
    pub apis: Vec<Api>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl PersistedCatalog {
    /// Parse catalog text; `.json` files are JSON, everything else YAML.
    pub fn parse(path: &Path, data: &str) -> anyhow::Result<Self> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            serde_json::from_str(data)?
        } else {
            serde_yaml::from_str(data)?
        };
        Ok(catalog)
    }
}

/// Load a catalog file into `cache`.
///
/// * If the file does not exist            → logs and returns empty stats.
/// * If the file exists but is malformed   → error; a broken catalog must not
///   silently come up empty.
/// * Routes whose api is not in the file   → skipped with a warning.
pub fn load_catalog(path: &Path, cache: &CatalogCache) -> anyhow::Result<CatalogStats> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "catalog: file not found, starting with an empty catalog");
        return Ok(cache.stats());
    }

    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file {}", path.display()))?;
    let catalog = PersistedCatalog::parse(path, &data)
        .with_context(|| format!("catalog file {} is malformed", path.display()))?;

    for api in catalog.apis {
        cache.insert_api(api);
    }

    let mut orphans = 0usize;
    for route in catalog.routes {
        if !cache.apis.contains_key(&route.api_id) {
            orphans += 1;
            tracing::warn!(route_id = %route.id, api_id = %route.api_id, "catalog: route references unknown api, skipped");
            continue;
        }
        cache.insert_route(route);
    }

    let stats = cache.stats();
    tracing::info!(
        apis = stats.apis,
        routes = stats.routes,
        skipped_routes = orphans,
        path = %path.display(),
        "catalog: loaded"
    );
    Ok(stats)
}
