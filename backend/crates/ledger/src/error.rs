//! Ledger Error Types
//!
//! This module provides ledger-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-specific error variants
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transaction does not exist
    #[error("Transaction not found")]
    NotFound,

    /// Uploaded receipt is not a PDF
    #[error("Only PDF receipts are accepted")]
    UnsupportedFileType,

    /// Receipt file storage failure
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LedgerError::NotFound => StatusCode::NOT_FOUND,
            LedgerError::UnsupportedFileType => StatusCode::BAD_REQUEST,
            LedgerError::Storage(_) | LedgerError::Database(_) | LedgerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotFound => ErrorKind::NotFound,
            LedgerError::UnsupportedFileType => ErrorKind::BadRequest,
            LedgerError::Storage(_) | LedgerError::Database(_) | LedgerError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            LedgerError::Storage(_) | LedgerError::Database(_) | LedgerError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LedgerError::Database(e) => {
                tracing::error!(error = %e, "ledger database error");
            }
            LedgerError::Storage(e) => {
                tracing::error!(error = %e, "receipt storage error");
            }
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "ledger internal error");
            }
            _ => {
                tracing::debug!(error = %self, "ledger error");
            }
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        err.log();
        err.to_app_error()
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
