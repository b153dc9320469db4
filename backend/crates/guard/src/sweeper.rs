//! Background Sweepers
//!
//! Periodic tasks that drop expired state so the in-memory tables do not
//! grow with abandoned sessions or one-off clients. Request handling never
//! pays the sweep cost.

use crate::store::CsrfTokenStore;
use platform::rate_limit::FixedWindowLimiter;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Spawn the sweep loop
///
/// Runs until the returned handle is aborted or the runtime shuts down.
pub fn spawn_sweeper(store: Arc<CsrfTokenStore>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // 初回の即時tickは捨てる
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = store.sweep_expired();
            if removed > 0 {
                tracing::debug!(removed, live = store.len(), "swept expired CSRF tokens");
            }
        }
    })
}

/// Spawn a purge loop for a rate limiter
///
/// Limiter slots expire with their window but stay in the map until
/// purged, so every limiter needs one of these alongside it.
pub fn spawn_limiter_purge(
    limiter: Arc<FixedWindowLimiter>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // 初回の即時tickは捨てる
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = limiter.purge_expired();
            if removed > 0 {
                tracing::debug!(removed, live = limiter.len(), "purged stale rate limit slots");
            }
        }
    })
}
