//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{NewTransaction, Totals, Transaction};
use crate::error::LedgerResult;

/// Transaction repository trait
#[trait_variant::make(TransactionRepository: Send)]
pub trait LocalTransactionRepository {
    /// Persist a new transaction, returning the assigned id
    async fn insert(&self, tx: &NewTransaction) -> LedgerResult<i64>;

    /// All transactions for a user, newest first (date, then id)
    async fn list_by_user(&self, user_id: i64) -> LedgerResult<Vec<Transaction>>;

    /// Delete by id, returning the number of rows removed
    async fn delete_by_id(&self, id: i64) -> LedgerResult<u64>;

    /// Income and expense totals for a user; zeros when no rows
    async fn aggregate_by_user(&self, user_id: i64) -> LedgerResult<Totals>;
}
