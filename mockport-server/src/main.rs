// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  mockport: developer portal for published mock APIs
//
//  serve:    portal HTTP API (invoke, call log, monitor snapshots)
//  monitor:  terminal call monitor polling a running portal
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod remote;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mockport_core::config::{DEFAULT_REFRESH_INTERVAL_MS, DEFAULT_WINDOW, PortalConfig};
use mockport_observability::{MetricsCollector, Monitor, MonitorView};
use mockport_portal::{PortalState, start_portal};
use mockport_store::{CatalogCache, LogJournal, MemoryLogStore, journal, persist};
use remote::HttpLogReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mockport", version, about = "mockport: mock API portal with a live call monitor")]
struct Cli {
    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the portal HTTP API
    Serve {
        /// Path to configuration file
        #[arg(short, long, default_value = "mockport.yaml")]
        config: PathBuf,
    },
    /// Watch the recent calls of one api on a running portal
    Monitor {
        /// Base URL of the portal
        #[arg(long, default_value = "http://127.0.0.1:9180")]
        url: String,

        /// Api id to watch
        #[arg(long)]
        api: String,

        /// Refresh interval in milliseconds
        #[arg(long, default_value_t = DEFAULT_REFRESH_INTERVAL_MS)]
        interval_ms: u64,

        /// Number of recent calls shown and aggregated
        #[arg(long, default_value_t = DEFAULT_WINDOW)]
        window: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    rt.block_on(async {
        match cli.command {
            Command::Serve { config } => serve(&config).await,
            Command::Monitor {
                url,
                api,
                interval_ms,
                window,
            } => monitor(url, api, Duration::from_millis(interval_ms), window).await,
        }
    })
}

async fn serve(config_path: &Path) -> anyhow::Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "mockport starting");

    // ── Config ──
    let config = if config_path.exists() {
        info!(path = %config_path.display(), "Loading config file");
        PortalConfig::load(config_path)?
    } else {
        info!("No config file found, using defaults");
        PortalConfig::default()
    };

    // ── Catalog ──
    let catalog = CatalogCache::new();
    if let Some(path) = &config.store.catalog_file {
        let stats = persist::load_catalog(path, &catalog)?;
        info!(%stats, "Catalog ready");
    } else {
        info!("No catalog file configured, catalog is empty");
    }

    // ── Call log (journal replay, then append) ──
    let logs = match &config.store.log_journal {
        Some(path) => {
            let history = journal::replay(path)
                .with_context(|| format!("failed to replay call journal {}", path.display()))?;
            let journal = LogJournal::open(path)
                .with_context(|| format!("failed to open call journal {}", path.display()))?;
            let store = MemoryLogStore::with_journal(journal);
            let restored = store.restore(history)?;
            info!(records = restored, "Call log restored");
            store
        }
        None => MemoryLogStore::new(),
    };

    // ── Metrics ──
    let metrics = Arc::new(MetricsCollector::new(config.observability.prometheus.enabled)?);

    let state = Arc::new(PortalState::new(&config, catalog, Arc::new(logs), metrics));

    info!(
        addr = %config.server.addr,
        window = config.monitor.window,
        "mockport is ready"
    );

    start_portal(config.server.clone(), state).await?;

    info!("mockport stopped");
    Ok(())
}

async fn monitor(url: String, api: String, interval: Duration, window: usize) -> anyhow::Result<()> {
    info!(url = %url, api = %api, interval_ms = interval.as_millis() as u64, window, "Monitoring calls");

    let monitor = Monitor::new(Arc::new(HttpLogReader::new(url)), api, window);
    let mut views = monitor.subscribe();
    monitor.start(interval);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                print_view(&view);
            }
        }
    }

    monitor.stop();
    info!("Monitor stopped");
    Ok(())
}

fn print_view(view: &MonitorView) {
    match view {
        MonitorView::Loading => println!("loading…"),
        MonitorView::Error { message } => println!("error: {message}"),
        MonitorView::Empty { kpis } => {
            println!(
                "avg latency {} | error rate {} | samples 0 | no calls yet",
                kpis.latency_label(),
                kpis.error_rate_label()
            );
        }
        MonitorView::Ready { records, kpis } => {
            println!(
                "avg latency {} | error rate {} | samples {}",
                kpis.latency_label(),
                kpis.error_rate_label(),
                kpis.sample_count
            );
            for r in records {
                println!(
                    "  {}  {:<7} {:<32} {:>3}  {:>4} ms",
                    r.created_at.format("%H:%M:%S%.3f"),
                    r.method,
                    r.path,
                    r.status_code,
                    r.latency_ms
                );
            }
        }
    }
}
