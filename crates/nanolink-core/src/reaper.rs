use crate::store::AliasStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// Background task that periodically evicts expired records.
///
/// Lookups only lazily reject expired records; the reaper is what actually
/// frees memory for aliases that are never looked up again. It shares the
/// store with the request handlers and goes through the same store API, so
/// a sweep can never race a handler on the same alias.
pub struct Reaper {
    store: Arc<AliasStore>,
    interval: Duration,
}

impl Reaper {
    pub fn new(store: Arc<AliasStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Starts the sweep loop on the tokio runtime.
    ///
    /// The returned handle stops the loop; dropping it instead leaves the
    /// task running for the life of the runtime.
    pub fn spawn(self) -> ReaperHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(());

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = self.store.sweep_expired();
                        if evicted > 0 {
                            debug!(evicted, remaining = self.store.len(), "swept expired aliases");
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        debug!("reaper shutting down");
                        break;
                    }
                }
            }
        });

        ReaperHandle { shutdown_tx, task }
    }
}

/// Handle for stopping a running [`Reaper`].
pub struct ReaperHandle {
    shutdown_tx: watch::Sender<()>,
    task: JoinHandle<()>,
}

impl ReaperHandle {
    /// Signals the sweep loop to stop and waits for it to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }
}
