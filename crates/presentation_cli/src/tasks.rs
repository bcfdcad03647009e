//! Periodic sync drivers
//!
//! Two independent loops drive the same [`SyncService`]: a foreground one
//! that runs immediately and then on a short period, and a background one
//! on a longer period that waits one full period before its first run.
//! Both keep running after a failed sync.

use std::sync::Arc;
use std::time::Duration;

use application::{SyncOutcome, SyncService};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Spawn the foreground sync loop
///
/// Returns a `JoinHandle` to abort the loop when the session ends.
pub fn spawn_foreground_sync(sync: Arc<SyncService>, interval: Duration) -> JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        "Starting foreground sync"
    );
    spawn_sync_loop(sync, interval, "foreground", false)
}

/// Spawn the background sync loop
///
/// The first sync happens after one full `interval`.
pub fn spawn_background_sync(sync: Arc<SyncService>, interval: Duration) -> JoinHandle<()> {
    info!(
        interval_secs = interval.as_secs(),
        "Starting background sync"
    );
    spawn_sync_loop(sync, interval, "background", true)
}

fn spawn_sync_loop(
    sync: Arc<SyncService>,
    interval: Duration,
    driver: &'static str,
    delay_first: bool,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if delay_first {
            // interval() completes its first tick immediately
            ticker.tick().await;
        }

        loop {
            ticker.tick().await;
            debug!(driver, "Running sync");

            match sync.send_request().await {
                SyncOutcome::Completed {
                    alerts,
                    scheduled,
                    suppressed,
                } => {
                    if scheduled > 0 {
                        info!(driver, alerts, scheduled, suppressed, "Sync notified alerts");
                    } else {
                        debug!(driver, alerts, suppressed, "Sync found nothing new");
                    }
                },
                SyncOutcome::Failed(reason) => {
                    warn!(driver, error = %reason, "Sync failed");
                },
            }
        }
    })
}
