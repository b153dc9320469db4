//! Request Guard Module
//!
//! Cross-cutting request protection for the HTTP layer:
//! - `store` - Per-session CSRF token table with single-use rotation
//! - `middleware` - CSRF enforcement and per-client rate limiting
//! - `sweeper` - Background expiry of abandoned tokens and limiter slots
//!
//! ## Security Model
//! - Tokens are 32 random bytes, hex encoded, one live token per session
//! - Every successful mutating request rotates the token; replay of a
//!   consumed token is rejected
//! - The session key comes only from the `X-Session-Id` header; there is
//!   no fallback to the client address

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod store;
pub mod sweeper;

pub use config::GuardConfig;
pub use error::{GuardError, GuardResult};
pub use handlers::GuardState;
pub use router::guard_router;
pub use store::CsrfTokenStore;
pub use sweeper::{spawn_limiter_purge, spawn_sweeper};

#[cfg(test)]
mod tests;
