//! Near-real-time call monitor for one api.
//!
//! A [`Monitor`] periodically reads the newest records of an api, derives
//! [`Kpis`] from them and publishes the result as a [`MonitorView`]. Views
//! are published on a `watch` channel so any number of consumers can render
//! the latest state without sharing mutable data.

use crate::kpi::{Kpis, aggregate};
use crate::scheduler::{RefreshHandle, RefreshScheduler};
use mockport_core::error::PortalError;
use mockport_core::id;
use mockport_core::log::LogRecord;
use mockport_core::repository::LogReader;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// What a monitor shows. The four states never overlap.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MonitorView {
    /// No fetch has completed yet.
    Loading,
    /// The last fetch failed.
    Error { message: String },
    /// The last fetch succeeded with zero records.
    Empty { kpis: Kpis },
    /// The last fetch returned records, newest first.
    Ready { records: Vec<LogRecord>, kpis: Kpis },
}

impl MonitorView {
    /// Build a view from the result of a log read.
    pub fn from_fetch(result: Result<Vec<LogRecord>, PortalError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => MonitorView::Empty { kpis: aggregate(&[]) },
            Ok(records) => {
                let kpis = aggregate(&records);
                MonitorView::Ready { records, kpis }
            }
            Err(e) => MonitorView::Error {
                message: e.to_string(),
            },
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            MonitorView::Loading => "loading",
            MonitorView::Error { .. } => "error",
            MonitorView::Empty { .. } => "empty",
            MonitorView::Ready { .. } => "ready",
        }
    }

    pub fn kpis(&self) -> Option<&Kpis> {
        match self {
            MonitorView::Empty { kpis } | MonitorView::Ready { kpis, .. } => Some(kpis),
            _ => None,
        }
    }

    pub fn records(&self) -> &[LogRecord] {
        match self {
            MonitorView::Ready { records, .. } => records,
            _ => &[],
        }
    }
}

struct MonitorInner {
    reader: Arc<dyn LogReader>,
    api_id: String,
    window: usize,
    view: watch::Sender<Arc<MonitorView>>,
}

impl MonitorInner {
    async fn refresh(&self) -> Arc<MonitorView> {
        let view = match id::validate(&self.api_id) {
            Err(e) => MonitorView::Error {
                message: e.to_string(),
            },
            Ok(api_id) => MonitorView::from_fetch(self.reader.recent(&api_id, self.window).await),
        };

        if let MonitorView::Error { message } = &view {
            warn!(api_id = %self.api_id, error = %message, "Monitor refresh failed");
        } else {
            debug!(api_id = %self.api_id, state = view.state_name(), "Monitor refreshed");
        }

        let view = Arc::new(view);
        self.view.send_replace(Arc::clone(&view));
        view
    }
}

/// Polls the call log of one api and publishes [`MonitorView`]s.
pub struct Monitor {
    inner: Arc<MonitorInner>,
    schedule: Mutex<Option<RefreshHandle>>,
}

impl Monitor {
    /// `api_id` is the raw, unvalidated id; an invalid id shows up as an
    /// error view and never reaches the reader.
    pub fn new(reader: Arc<dyn LogReader>, api_id: impl Into<String>, window: usize) -> Self {
        let (view, _) = watch::channel(Arc::new(MonitorView::Loading));
        Self {
            inner: Arc::new(MonitorInner {
                reader,
                api_id: api_id.into(),
                window,
                view,
            }),
            schedule: Mutex::new(None),
        }
    }

    pub fn api_id(&self) -> &str {
        &self.inner.api_id
    }

    /// Fetch once, publish and return the new view.
    pub async fn refresh(&self) -> Arc<MonitorView> {
        self.inner.refresh().await
    }

    /// Latest published view.
    pub fn current(&self) -> Arc<MonitorView> {
        self.inner.view.borrow().clone()
    }

    /// Receiver that observes every published view.
    pub fn subscribe(&self) -> watch::Receiver<Arc<MonitorView>> {
        self.inner.view.subscribe()
    }

    /// Start refreshing every `interval`, replacing any running schedule.
    pub fn start(&self, interval: Duration) {
        let mut schedule = self.schedule.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = schedule.take() {
            previous.stop();
        }

        let inner = Arc::clone(&self.inner);
        *schedule = Some(RefreshScheduler::start(interval, move || {
            let inner = Arc::clone(&inner);
            async move {
                inner.refresh().await;
            }
        }));
    }

    /// Stop refreshing. Idempotent.
    pub fn stop(&self) {
        let mut schedule = self.schedule.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(handle) = schedule.take() {
            handle.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.schedule
            .lock()
            .map(|s| s.as_ref().is_some_and(|h| !h.is_stopped()))
            .unwrap_or(false)
    }
}

impl Drop for Monitor {
    fn drop(&mut self) {
        self.stop();
    }
}
