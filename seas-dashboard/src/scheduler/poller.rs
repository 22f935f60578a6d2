//! Job poller
//!
//! Lists the directory's jobs on a fixed interval and publishes each
//! successful listing as the new snapshot. Every tick issues its own request
//! in a separate task, so a slow response never delays the next tick and the
//! last response to arrive wins.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tracing::{debug, info, warn};

use crate::repository::JobDirectory;
use crate::state::{DashboardStore, Snapshot};

/// Periodic snapshot refresher
pub struct Poller {
    directory: Arc<dyn JobDirectory>,
    store: Arc<DashboardStore>,
    interval: Duration,
}

impl Poller {
    /// Creates a new poller
    pub fn new(
        directory: Arc<dyn JobDirectory>,
        store: Arc<DashboardStore>,
        interval: Duration,
    ) -> Self {
        Self {
            directory,
            store,
            interval,
        }
    }

    /// Starts polling; the first request goes out immediately
    pub fn start(self) -> PollerHandle {
        info!("Starting job poller (interval: {:?})", self.interval);

        let ticker = tokio::spawn(async move {
            let mut interval = time::interval(self.interval);
            interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                debug!("Polling job directory");

                let directory = Arc::clone(&self.directory);
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    refresh_snapshot(directory.as_ref(), &store).await;
                });
            }
        });

        PollerHandle { ticker }
    }
}

/// Owned handle to a running poller
#[must_use = "the poller can only be stopped through its handle"]
pub struct PollerHandle {
    ticker: JoinHandle<()>,
}

impl PollerHandle {
    /// Stops future ticks
    ///
    /// Requests already in flight still complete and may still update the
    /// snapshot.
    pub fn stop(self) {
        self.ticker.abort();
        info!("Job poller stopped");
    }
}

/// Performs a single listing and replaces the snapshot on success
///
/// Failures are logged and absorbed; the previous snapshot stays in place
/// until a later refresh succeeds.
///
/// # Returns
/// Whether the snapshot was replaced
pub async fn refresh_snapshot(directory: &dyn JobDirectory, store: &DashboardStore) -> bool {
    match directory.list_jobs().await {
        Ok(jobs) => {
            let snapshot = Snapshot::new(jobs);
            if snapshot.is_empty() {
                debug!("Job directory has no jobs");
            } else {
                debug!("Received {} job(s)", snapshot.len());
            }
            store.replace_snapshot(snapshot);
            true
        }
        Err(e) => {
            warn!("Failed to fetch jobs: {}", e);
            false
        }
    }
}
