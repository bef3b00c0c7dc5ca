//! TTL Sweep Task
//!
//! Background task that periodically removes expired cache entries, so a
//! large population of entries nobody reads anymore still gets reclaimed
//! instead of waiting on lazy expiry.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. It acquires a write lock on the cache only for the
/// duration of each sweep.
///
/// # Returns
/// A JoinHandle for the spawned task, which the owner aborts during
/// shutdown.
pub fn spawn_sweep_task(cache: SharedCache, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs(), "starting TTL sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache = cache.write().await;
                cache.cleanup()
            };

            if removed > 0 {
                info!(removed, "TTL sweep removed expired entries");
            } else {
                debug!("TTL sweep found no expired entries");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::shared_cache;

    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_expired_entries() {
        let cache = shared_cache();

        {
            let mut cache = cache.write().await;
            cache.set_json("expire_soon", &"value", Duration::from_secs(1));
        }

        let handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
        settle().await;

        tokio::time::advance(Duration::from_millis(2500)).await;
        settle().await;
        tokio::time::advance(Duration::from_millis(1000)).await;
        settle().await;

        {
            let mut cache = cache.write().await;
            // Removed by the sweep, not just invisible to reads
            assert_eq!(cache.len(), 0);
            assert!(cache.get_json::<String>("expire_soon").is_none());
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_preserves_valid_entries() {
        let cache = shared_cache();

        {
            let mut cache = cache.write().await;
            cache.set_json("long_lived", &"value", Duration::from_secs(3600));
        }

        let handle = spawn_sweep_task(cache.clone(), Duration::from_secs(1));
        settle().await;

        tokio::time::advance(Duration::from_millis(1500)).await;
        settle().await;

        {
            let mut cache = cache.write().await;
            assert_eq!(
                cache.get_json::<String>("long_lived"),
                Some("value".to_string())
            );
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_task_can_be_aborted() {
        let cache = shared_cache();

        let handle = spawn_sweep_task(cache, Duration::from_secs(1));
        settle().await;

        handle.abort();
        settle().await;

        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
