//! Guard Middleware
//!
//! CSRF enforcement for mutating requests and fixed-window rate limiting
//! keyed by client address.

use crate::config::CSRF_HEADER;
use crate::error::GuardError;
use crate::handlers::{GuardState, session_id_from};
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::client_key;
use platform::rate_limit::FixedWindowLimiter;
use std::sync::Arc;

/// Middleware that requires a valid, unconsumed CSRF token on every
/// mutating request
///
/// Safe methods (GET, HEAD, OPTIONS) pass through untouched. On success
/// the rotated replacement token is returned in the `X-CSRF-Token`
/// response header.
pub async fn require_csrf_token(
    State(state): State<GuardState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    if matches!(*req.method(), Method::GET | Method::HEAD | Method::OPTIONS) {
        return Ok(next.run(req).await);
    }

    if !state.config.enforce {
        tracing::debug!(method = %req.method(), path = %req.uri().path(), "CSRF enforcement disabled");
        return Ok(next.run(req).await);
    }

    let rotated = {
        let headers = req.headers();
        let session_id = session_id_from(headers).map_err(IntoResponse::into_response)?;
        let presented = headers
            .get(&CSRF_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| GuardError::MissingToken.into_response())?;

        state
            .store
            .validate_and_rotate(session_id, presented)
            .map_err(IntoResponse::into_response)?
    };

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&rotated) {
        response.headers_mut().insert(CSRF_HEADER.clone(), value);
    }
    Ok(response)
}

/// Rate limiter middleware state
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<FixedWindowLimiter>,
}

impl RateLimitState {
    pub fn new(limiter: FixedWindowLimiter) -> Self {
        Self {
            limiter: Arc::new(limiter),
        }
    }
}

/// Middleware that enforces a fixed-window request quota per client IP
///
/// Emits draft `RateLimit-*` headers on every response, including
/// rejections.
pub async fn enforce_rate_limit(
    State(state): State<RateLimitState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let direct_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());
    let key = client_key(req.headers(), direct_ip);

    let decision = state.limiter.check(&key);

    let mut response = if decision.allowed {
        next.run(req).await
    } else {
        tracing::warn!(client = %key, "rate limit exceeded");
        AppError::too_many_requests("Too many requests, please try again later.").into_response()
    };

    let headers = response.headers_mut();
    headers.insert("ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert(
        "ratelimit-reset",
        HeaderValue::from(decision.reset_after.as_secs()),
    );
    response
}
