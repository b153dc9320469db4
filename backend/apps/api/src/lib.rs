//! API Composition
//!
//! Router assembly lives here so integration tests can drive the full
//! middleware stack against repository doubles; `main.rs` only wires
//! real infrastructure in.

pub mod config;
pub mod router;

pub use config::AppConfig;
pub use router::{RouterDeps, build_router};
