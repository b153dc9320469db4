//! Guard Configuration

use axum::http::HeaderName;
use std::time::Duration;

/// Header carrying the caller's session identifier
pub static SESSION_HEADER: HeaderName = HeaderName::from_static("x-session-id");

/// Header carrying (and returning) the CSRF token
pub static CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrf-token");

/// Guard configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Token lifetime
    pub token_ttl: Duration,
    /// Interval between background sweeps of expired tokens
    pub sweep_interval: Duration,
    /// When false, CSRF checks log and pass instead of rejecting
    pub enforce: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(3600),
            sweep_interval: Duration::from_secs(300),
            enforce: true,
        }
    }
}

impl GuardConfig {
    /// Permissive config for local development
    pub fn permissive() -> Self {
        Self {
            enforce: false,
            ..Default::default()
        }
    }
}
