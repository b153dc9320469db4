//! List Transactions Use Case

use std::sync::Arc;

use crate::domain::entity::Transaction;
use crate::domain::repository::TransactionRepository;
use crate::error::LedgerResult;

/// List transactions use case
pub struct ListTransactionsUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
}

impl<R> ListTransactionsUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: i64) -> LedgerResult<Vec<Transaction>> {
        self.repo.list_by_user(user_id).await
    }
}
