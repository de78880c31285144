pub mod kpi;
pub mod monitor;
pub mod scheduler;

#[cfg(feature = "prometheus")]
pub mod metrics;

pub use kpi::{Kpis, aggregate};
pub use monitor::{Monitor, MonitorView};
pub use scheduler::{RefreshHandle, RefreshScheduler};

#[cfg(feature = "prometheus")]
pub use metrics::MetricsCollector;
