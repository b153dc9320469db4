//! Delete Transaction Use Case

use std::sync::Arc;

use crate::domain::repository::TransactionRepository;
use crate::error::{LedgerError, LedgerResult};

/// Delete transaction use case
pub struct DeleteTransactionUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteTransactionUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: i64) -> LedgerResult<()> {
        let removed = self.repo.delete_by_id(id).await?;
        if removed == 0 {
            return Err(LedgerError::NotFound);
        }

        tracing::info!(transaction_id = id, "transaction deleted");
        Ok(())
    }
}
