//! Ledger Module
//!
//! Income and expense records per user, with optional PDF receipts.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database and file storage implementations
//! - `presentation/` - HTTP handlers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{LedgerError, LedgerResult};
pub use infra::postgres::PgTransactionRepository;
pub use infra::receipts::ReceiptStore;
pub use presentation::router::ledger_router;
