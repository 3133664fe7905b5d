//! Periodic Cleanup Task
//!
//! Background task that removes expired cache entries and idle rate-limit
//! windows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ProductCache;
use crate::limiter::RateLimiter;

/// Spawns a background task that periodically sweeps both structures.
///
/// Each tick removes expired products from the cache and drops limiter
/// windows whose every timestamp has aged out. The cache also expires
/// entries lazily on read; this sweep bounds the memory of entries nobody
/// asks for again.
///
/// # Arguments
/// * `cache` - Shared reference to the product cache
/// * `limiter` - Shared reference to the rate limiter
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during graceful shutdown.
pub fn spawn_cleanup_task(
    cache: Arc<RwLock<ProductCache>>,
    limiter: Arc<RwLock<RateLimiter>>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cleanup task with interval of {} seconds",
            cleanup_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let expired = {
                let mut cache_guard = cache.write().await;
                cache_guard.cleanup_expired()
            };

            let idle_users = {
                let mut limiter_guard = limiter.write().await;
                limiter_guard.sweep_idle()
            };

            if expired > 0 || idle_users > 0 {
                info!(
                    "Cleanup: removed {} expired products, {} idle users",
                    expired, idle_users
                );
            } else {
                debug!("Cleanup: nothing to remove");
            }
        }
    })
}
