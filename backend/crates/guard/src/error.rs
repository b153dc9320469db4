//! Guard Error Types
//!
//! Guard-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! All token failures share one outward message so a caller cannot probe
//! which check failed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Guard-specific result type alias
pub type GuardResult<T> = Result<T, GuardError>;

/// Guard-specific error variants
#[derive(Debug, Clone, Error)]
pub enum GuardError {
    /// Session identifier header absent on a protected request
    #[error("Session identifier header is required")]
    MissingSessionHeader,

    /// CSRF token header absent on a protected request
    #[error("CSRF token is missing")]
    MissingToken,

    /// No token was ever issued for this session
    #[error("No CSRF token issued for this session")]
    UnknownSession,

    /// Presented token does not match the live token
    #[error("CSRF token mismatch")]
    TokenMismatch,

    /// Live token outlived its TTL
    #[error("CSRF token expired")]
    TokenExpired,
}

impl GuardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GuardError::MissingSessionHeader => StatusCode::BAD_REQUEST,
            GuardError::MissingToken
            | GuardError::UnknownSession
            | GuardError::TokenMismatch
            | GuardError::TokenExpired => StatusCode::FORBIDDEN,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GuardError::MissingSessionHeader => ErrorKind::BadRequest,
            GuardError::MissingToken
            | GuardError::UnknownSession
            | GuardError::TokenMismatch
            | GuardError::TokenExpired => ErrorKind::Forbidden,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            GuardError::MissingSessionHeader => {
                tracing::debug!("request without session identifier header");
            }
            _ => {
                tracing::warn!(reason = %self, "CSRF validation failed");
            }
        }
    }
}

impl From<GuardError> for AppError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::MissingSessionHeader => {
                AppError::bad_request("Session identifier header is required")
            }
            // 同一メッセージで失敗理由を隠す
            _ => AppError::forbidden("Invalid CSRF token"),
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
