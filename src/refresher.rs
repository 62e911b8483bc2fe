use std::{sync::Arc, time::Duration};

use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::{
    backend::{BackendClient, fetch_or_empty},
    cache::ResultsCache,
};

#[derive(Debug, Clone)]
pub struct RefresherHandle {
    shutdown: Arc<tokio::sync::Mutex<Option<tokio::sync::oneshot::Sender<()>>>>,
}

impl RefresherHandle {
    pub async fn shutdown(&self) {
        let tx = self.shutdown.lock().await.take();
        if let Some(tx) = tx {
            let _ = tx.send(());
        }
    }
}

/// Spawns the periodic cache refresh task.
///
/// Ticks are serialized: the loop finishes one fetch-then-replace cycle
/// before waiting for the next tick, and missed ticks are delayed rather
/// than bursted, so two cycles never run against the cache concurrently.
/// A failed cycle is not retried early; the next tick is the retry.
pub fn spawn_refresher(
    interval: Duration,
    client: BackendClient,
    cache: Arc<ResultsCache>,
) -> RefresherHandle {
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let handle = RefresherHandle {
        shutdown: Arc::new(tokio::sync::Mutex::new(Some(shutdown_tx))),
    };

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => run_refresh_tick(&client, &cache).await,
                _ = &mut shutdown_rx => break,
            }
        }
    });

    handle
}

/// One fetch-then-replace cycle. An empty fetch result leaves the previous
/// cache contents in place.
pub async fn run_refresh_tick(client: &BackendClient, cache: &ResultsCache) {
    debug!("refreshing poll results");
    let results = fetch_or_empty(client).await;
    if results.is_empty() {
        debug!("no poll results this cycle, cache unchanged");
        return;
    }
    debug!(choices = results.len(), "updating result cache");
    cache.replace(results);
}
