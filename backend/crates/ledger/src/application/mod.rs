//! Application Layer (Use Cases)

pub mod create;
pub mod delete;
pub mod list;
pub mod stats;

pub use create::{CreateTransactionInput, CreateTransactionUseCase, ReceiptUpload};
pub use delete::DeleteTransactionUseCase;
pub use list::ListTransactionsUseCase;
pub use stats::StatsUseCase;
