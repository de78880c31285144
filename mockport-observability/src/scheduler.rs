use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Drives a periodic callback on a tokio task.
///
/// The first tick fires immediately, later ticks every `interval`. Ticks run
/// one after another on the same task; a slow tick delays the next one
/// rather than overlapping it.
pub struct RefreshScheduler;

impl RefreshScheduler {
    /// Start ticking. Must be called inside a tokio runtime.
    pub fn start<F, Fut>(interval: Duration, mut on_tick: F) -> RefreshHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        // tokio::time::interval panics on a zero period.
        let period = interval.max(Duration::from_millis(1));
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if *shutdown_rx.borrow() {
                            break;
                        }
                        on_tick().await;
                    }
                }
            }
            debug!("Refresh scheduler stopped");
        });

        debug!(interval_ms = period.as_millis() as u64, "Refresh scheduler started");

        RefreshHandle {
            shutdown: shutdown_tx,
            task,
        }
    }
}

/// Owner of a running schedule. Dropping it stops the schedule.
pub struct RefreshHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop ticking. Idempotent.
    ///
    /// No tick starts after this returns; a tick already running is
    /// cancelled at its next await point.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
        self.task.abort();
    }

    pub fn is_stopped(&self) -> bool {
        *self.shutdown.borrow()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
