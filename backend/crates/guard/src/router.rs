//! Guard Router

use crate::handlers::{self, GuardState};
use axum::{Router, routing::get};

/// Routes served by the guard itself
pub fn guard_router(state: GuardState) -> Router {
    Router::new()
        .route("/csrf-token", get(handlers::issue_token))
        .with_state(state)
}
