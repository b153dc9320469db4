//! Rate Limiting Infrastructure
//!
//! Fixed-window request counting per client identity. The map is a
//! [`DashMap`], so the check-then-increment on one key is atomic under the
//! shard entry guard while requests for other keys proceed in parallel.

use std::time::{Duration, Instant};

use dashmap::DashMap;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Auth-class limit: 5 requests per 15 minutes (brute-force protection)
    pub fn auth() -> Self {
        Self::new(5, 15 * 60)
    }

    /// General-class limit: 100 requests per 15 minutes
    pub fn general() -> Self {
        Self::new(100, 15 * 60)
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window resets
    pub reset_after: Duration,
}

#[derive(Debug)]
struct WindowSlot {
    count: u32,
    window_start: Instant,
}

/// In-memory fixed-window rate limiter
///
/// One instance per endpoint class. Constructed at startup and handed to
/// the middleware, never a module-level global.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    slots: DashMap<String, WindowSlot>,
    config: RateLimitConfig,
}

impl FixedWindowLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            slots: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count one request for `key` and decide whether it is allowed
    ///
    /// The entry guard holds the shard lock for the whole read-modify-write,
    /// so two concurrent requests for the same key cannot both observe the
    /// same count.
    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut slot = self
            .slots
            .entry(key.to_string())
            .or_insert_with(|| WindowSlot {
                count: 0,
                window_start: now,
            });

        let elapsed = now.duration_since(slot.window_start);
        if elapsed > self.config.window {
            slot.count = 0;
            slot.window_start = now;
        }

        slot.count += 1;

        let allowed = slot.count <= self.config.max_requests;
        let remaining = self.config.max_requests.saturating_sub(slot.count);
        let reset_after = self
            .config
            .window
            .saturating_sub(now.duration_since(slot.window_start));

        RateLimitDecision {
            allowed,
            limit: self.config.max_requests,
            remaining,
            reset_after,
        }
    }

    /// Number of client slots currently tracked
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drop slots whose window has fully elapsed
    ///
    /// Returns the number of removed slots.
    pub fn purge_expired(&self) -> usize {
        let before = self.slots.len();
        let now = Instant::now();
        let window = self.config.window;
        self.slots
            .retain(|_, slot| now.duration_since(slot.window_start) <= window);
        before - self.slots.len()
    }

    /// Move a key's window start back in time (window-expiry tests)
    #[cfg(test)]
    fn backdate(&self, key: &str, by: Duration) {
        if let Some(mut slot) = self.slots.get_mut(key) {
            slot.window_start -= by;
        }
    }
}
