//! CSRF Token Store
//!
//! In-memory table mapping session identifiers to their live token.
//! Issue and rotate both replace the stored token, so at most one token
//! is valid per session at any time.

use crate::error::GuardError;
use dashmap::DashMap;
use platform::crypto::{constant_time_eq, random_token_hex};
use std::time::{Duration, Instant};

/// Token length in bytes before hex encoding
pub const TOKEN_BYTES: usize = 32;

#[derive(Debug)]
struct IssuedToken {
    token: String,
    issued_at: Instant,
}

/// Per-session single-use CSRF tokens
#[derive(Debug)]
pub struct CsrfTokenStore {
    tokens: DashMap<String, IssuedToken>,
    ttl: Duration,
}

impl CsrfTokenStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
        }
    }

    /// Issue a fresh token for a session, replacing any previous one
    pub fn issue(&self, session_id: &str) -> String {
        let token = random_token_hex(TOKEN_BYTES);
        self.tokens.insert(
            session_id.to_string(),
            IssuedToken {
                token: token.clone(),
                issued_at: Instant::now(),
            },
        );
        token
    }

    /// Validate a presented token and rotate it in one step
    ///
    /// On success the replacement token is stored and returned; the
    /// presented token is dead from this point on. Comparison is
    /// constant-time. The check-and-swap runs under the entry's shard
    /// lock, so two concurrent requests with the same token cannot both
    /// pass.
    pub fn validate_and_rotate(
        &self,
        session_id: &str,
        presented: &str,
    ) -> Result<String, GuardError> {
        let mut entry = self
            .tokens
            .get_mut(session_id)
            .ok_or(GuardError::UnknownSession)?;

        if entry.issued_at.elapsed() > self.ttl {
            drop(entry);
            self.tokens.remove(session_id);
            return Err(GuardError::TokenExpired);
        }

        if !constant_time_eq(entry.token.as_bytes(), presented.as_bytes()) {
            return Err(GuardError::TokenMismatch);
        }

        let next = random_token_hex(TOKEN_BYTES);
        entry.token = next.clone();
        entry.issued_at = Instant::now();
        Ok(next)
    }

    /// Drop every token past its TTL, returning how many were removed
    pub fn sweep_expired(&self) -> usize {
        let before = self.tokens.len();
        self.tokens
            .retain(|_, issued| issued.issued_at.elapsed() <= self.ttl);
        before - self.tokens.len()
    }

    /// Number of live sessions with a token
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Shift a token's issue time into the past (test clock control)
    #[cfg(test)]
    pub fn backdate(&self, session_id: &str, by: Duration) {
        if let Some(mut entry) = self.tokens.get_mut(session_id) {
            entry.issued_at = Instant::now() - by;
        }
    }
}
