//! Ledger Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::TransactionRepository;
use crate::infra::receipts::ReceiptStore;
use crate::presentation::handlers::{self, LedgerAppState};

/// Create the ledger router for any repository implementation
pub fn ledger_router<R>(repo: R, receipts: ReceiptStore) -> Router
where
    R: TransactionRepository + Clone + Send + Sync + 'static,
{
    let state = LedgerAppState {
        repo: Arc::new(repo),
        receipts: Arc::new(receipts),
    };

    Router::new()
        .route("/transactions", post(handlers::create::<R>))
        // {id} is the owning user on GET and the transaction on DELETE
        .route(
            "/transactions/{id}",
            get(handlers::list::<R>).delete(handlers::remove::<R>),
        )
        .route("/stats/{id}", get(handlers::stats::<R>))
        .with_state(state)
}
