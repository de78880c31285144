use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Invocation metrics, gated behind `enabled`.
///
/// When `enabled = false` no registry is created and every `record_*` call
/// returns immediately.
pub struct MetricsCollector {
    enabled: bool,
    registry: Option<Registry>,
    pub invocations_total: Option<IntCounterVec>,
    pub simulated_latency: Option<HistogramVec>,
    pub log_write_failures: Option<IntCounter>,
}

impl MetricsCollector {
    /// Create a new collector. When `enabled = false`, everything is None.
    pub fn new(enabled: bool) -> anyhow::Result<Self> {
        if !enabled {
            return Ok(Self::disabled());
        }

        let registry = Registry::new();

        let invocations_total = IntCounterVec::new(
            Opts::new("invocations_total", "Simulated route invocations").namespace("mockport"),
            &["route", "method", "status"],
        )?;

        let simulated_latency = HistogramVec::new(
            HistogramOpts::new("simulated_latency_ms", "Simulated latency handed to callers")
                .namespace("mockport")
                .buckets(vec![40.0, 60.0, 80.0, 100.0, 140.0, 180.0, 220.0, 260.0]),
            &["route"],
        )?;

        let log_write_failures = IntCounter::with_opts(
            Opts::new("log_write_failures_total", "Invocations failed by the log write")
                .namespace("mockport"),
        )?;

        registry.register(Box::new(invocations_total.clone()))?;
        registry.register(Box::new(simulated_latency.clone()))?;
        registry.register(Box::new(log_write_failures.clone()))?;

        Ok(Self {
            enabled: true,
            registry: Some(registry),
            invocations_total: Some(invocations_total),
            simulated_latency: Some(simulated_latency),
            log_write_failures: Some(log_write_failures),
        })
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            registry: None,
            invocations_total: None,
            simulated_latency: None,
            log_write_failures: None,
        }
    }

    /// Record a completed invocation (no-op when disabled).
    #[inline]
    pub fn record_invocation(&self, route: &str, method: &str, status: u16, latency_ms: u32) {
        if !self.enabled {
            return;
        }
        if let Some(ref counter) = self.invocations_total {
            let mut buf = itoa::Buffer::new();
            let status_str = buf.format(status);
            counter.with_label_values(&[route, method, status_str]).inc();
        }
        if let Some(ref hist) = self.simulated_latency {
            hist.with_label_values(&[route]).observe(f64::from(latency_ms));
        }
    }

    /// Record an invocation that failed because its log record could not be written.
    #[inline]
    pub fn record_log_write_failure(&self) {
        if let Some(ref counter) = self.log_write_failures {
            counter.inc();
        }
    }

    /// Render prometheus text exposition format.
    pub fn render(&self) -> String {
        if let Some(ref registry) = self.registry {
            let encoder = TextEncoder::new();
            let metric_families = registry.gather();
            let mut buffer = Vec::new();
            encoder.encode(&metric_families, &mut buffer).unwrap_or(());
            String::from_utf8(buffer).unwrap_or_default()
        } else {
            String::new()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
