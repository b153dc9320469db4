//! Stats Use Case

use std::sync::Arc;

use crate::domain::entity::Totals;
use crate::domain::repository::TransactionRepository;
use crate::error::LedgerResult;

/// Aggregate totals use case
pub struct StatsUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
}

impl<R> StatsUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: i64) -> LedgerResult<Totals> {
        self.repo.aggregate_by_user(user_id).await
    }
}
