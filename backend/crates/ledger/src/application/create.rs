//! Create Transaction Use Case
//!
//! Stores the receipt (when present) before the database row, so a row
//! never references a file that failed to write.

use std::sync::Arc;

use crate::domain::entity::{NewTransaction, TransactionType};
use crate::domain::repository::TransactionRepository;
use crate::error::LedgerResult;
use crate::infra::receipts::ReceiptStore;
use chrono::NaiveDate;

/// Receipt payload lifted out of the multipart request
pub struct ReceiptUpload {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Create input
pub struct CreateTransactionInput {
    pub user_id: i64,
    pub kind: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub receipt: Option<ReceiptUpload>,
}

/// Create transaction use case
pub struct CreateTransactionUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
    receipts: Arc<ReceiptStore>,
}

impl<R> CreateTransactionUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>, receipts: Arc<ReceiptStore>) -> Self {
        Self { repo, receipts }
    }

    pub async fn execute(&self, input: CreateTransactionInput) -> LedgerResult<i64> {
        let receipt_file = match input.receipt {
            Some(upload) => Some(
                self.receipts
                    .save_pdf(upload.content_type.as_deref(), &upload.bytes)
                    .await?,
            ),
            None => None,
        };

        let tx = NewTransaction {
            user_id: input.user_id,
            kind: input.kind,
            description: input.description,
            amount: input.amount,
            category: input.category,
            date: input.date,
            receipt_file,
        };

        let id = self.repo.insert(&tx).await?;

        tracing::info!(
            transaction_id = id,
            user_id = tx.user_id,
            kind = %tx.kind,
            "transaction created"
        );

        Ok(id)
    }
}
