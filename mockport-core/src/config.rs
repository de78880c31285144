use figment::{Figment, providers::{Env, Format, Yaml}};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Records shown by the monitor and used for its KPIs.
pub const DEFAULT_WINDOW: usize = 10;
/// Monitor refresh spacing.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 2000;
/// Largest `limit` accepted by the log endpoint.
pub const DEFAULT_MAX_LIMIT: usize = 100;
/// Upper bound for a single storage call.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Top-level portal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Portal HTTP API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Catalog and call-log locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// YAML or JSON file with `apis` and `routes`. None = empty catalog.
    #[serde(default)]
    pub catalog_file: Option<PathBuf>,
    /// JSON-lines journal of call records. None = in-memory only.
    #[serde(default)]
    pub log_journal: Option<PathBuf>,
    #[serde(default = "default_store_timeout")]
    pub timeout_ms: u64,
}

/// Monitor window and refresh cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u64,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

/// Observability settings, disabled by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default)]
    pub prometheus: PrometheusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrometheusConfig {
    /// When false, no prometheus counters are updated on the invocation path.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_addr() -> String { "0.0.0.0:9180".into() }
fn default_true() -> bool { true }
fn default_store_timeout() -> u64 { DEFAULT_STORE_TIMEOUT_MS }
fn default_window() -> usize { DEFAULT_WINDOW }
fn default_refresh_interval() -> u64 { DEFAULT_REFRESH_INTERVAL_MS }
fn default_max_limit() -> usize { DEFAULT_MAX_LIMIT }
fn default_metrics_path() -> String { "/metrics".into() }

// ── Impls ─────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            enabled: true,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_file: None,
            log_journal: None,
            timeout_ms: default_store_timeout(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window: default_window(),
            refresh_interval_ms: default_refresh_interval(),
            max_limit: default_max_limit(),
        }
    }
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_metrics_path(),
        }
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl MonitorConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Requested limit, or the window when absent, capped at `max_limit`.
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.window).min(self.max_limit)
    }
}

impl PortalConfig {
    /// Load configuration from YAML file + env overrides.
    ///
    /// Env vars use the `MOCKPORT_` prefix and `__` between sections,
    /// e.g. `MOCKPORT_STORE__TIMEOUT_MS=250`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config: PortalConfig = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("MOCKPORT_").split("__"))
            .extract()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── Default values ────────────────────────────────────────────

    #[test]
    fn default_server_config_has_expected_values() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.addr, "0.0.0.0:9180");
        assert!(cfg.enabled);
    }

    #[test]
    fn default_monitor_config_uses_named_constants() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.window, 10);
        assert_eq!(cfg.refresh_interval_ms, 2000);
        assert_eq!(cfg.max_limit, DEFAULT_MAX_LIMIT);
        assert_eq!(cfg.refresh_interval(), Duration::from_secs(2));
    }

    #[test]
    fn default_store_config_is_memory_only() {
        let cfg = StoreConfig::default();
        assert!(cfg.catalog_file.is_none());
        assert!(cfg.log_journal.is_none());
        assert_eq!(cfg.timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn default_prometheus_config_is_disabled() {
        let cfg = PrometheusConfig::default();
        assert!(!cfg.enabled);
        assert_eq!(cfg.path, "/metrics");
    }

    // ── effective_limit() ─────────────────────────────────────────

    #[test]
    fn effective_limit_defaults_to_window() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.effective_limit(None), 10);
    }

    #[test]
    fn effective_limit_is_capped() {
        let cfg = MonitorConfig::default();
        assert_eq!(cfg.effective_limit(Some(5)), 5);
        assert_eq!(cfg.effective_limit(Some(0)), 0);
        assert_eq!(cfg.effective_limit(Some(10_000)), DEFAULT_MAX_LIMIT);
    }

    // ── PortalConfig::load() ──────────────────────────────────────

    #[test]
    fn load_from_valid_yaml_overrides_defaults() {
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(
            tmpfile,
            "server:\n  addr: \"127.0.0.1:8088\"\nmonitor:\n  window: 3\n"
        )
        .unwrap();
        let cfg = PortalConfig::load(tmpfile.path()).unwrap();
        assert_eq!(cfg.server.addr, "127.0.0.1:8088");
        assert_eq!(cfg.monitor.window, 3);
        // Defaults still apply for unspecified fields
        assert_eq!(cfg.monitor.refresh_interval_ms, 2000);
        assert!(cfg.server.enabled);
    }

    #[test]
    fn load_yaml_with_store_and_observability() {
        let yaml = r#"
store:
  catalog_file: "/etc/mockport/catalog.yaml"
  log_journal: "/var/lib/mockport/calls.jsonl"
  timeout_ms: 250
observability:
  prometheus:
    enabled: true
    path: "/prom"
"#;
        let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
        write!(tmpfile, "{yaml}").unwrap();
        let cfg = PortalConfig::load(tmpfile.path()).unwrap();
        assert_eq!(
            cfg.store.catalog_file.as_deref(),
            Some(Path::new("/etc/mockport/catalog.yaml"))
        );
        assert_eq!(
            cfg.store.log_journal.as_deref(),
            Some(Path::new("/var/lib/mockport/calls.jsonl"))
        );
        assert_eq!(cfg.store.timeout_ms, 250);
        assert!(cfg.observability.prometheus.enabled);
        assert_eq!(cfg.observability.prometheus.path, "/prom");
    }
}
