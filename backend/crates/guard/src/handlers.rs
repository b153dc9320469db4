//! Guard HTTP Handlers

use crate::config::{CSRF_HEADER, GuardConfig, SESSION_HEADER};
use crate::error::{GuardError, GuardResult};
use crate::store::CsrfTokenStore;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName};
use serde::Serialize;
use std::sync::Arc;

/// Shared guard state
#[derive(Clone)]
pub struct GuardState {
    pub store: Arc<CsrfTokenStore>,
    pub config: Arc<GuardConfig>,
}

impl GuardState {
    pub fn new(config: GuardConfig) -> Self {
        Self {
            store: Arc::new(CsrfTokenStore::new(config.token_ttl)),
            config: Arc::new(config),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

/// GET /csrf-token
///
/// Issues a fresh token bound to the caller's session identifier. The
/// token is returned both in the body and in the `X-CSRF-Token` header.
pub async fn issue_token(
    State(state): State<GuardState>,
    headers: HeaderMap,
) -> GuardResult<([(HeaderName, String); 1], Json<TokenResponse>)> {
    let session_id = session_id_from(&headers)?;
    let token = state.store.issue(session_id);

    tracing::debug!(sessions = state.store.len(), "issued CSRF token");
    Ok((
        [(CSRF_HEADER.clone(), token.clone())],
        Json(TokenResponse { csrf_token: token }),
    ))
}

/// Read the session identifier header, rejecting absent or blank values
pub(crate) fn session_id_from(headers: &HeaderMap) -> Result<&str, GuardError> {
    headers
        .get(&SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(GuardError::MissingSessionHeader)
}
