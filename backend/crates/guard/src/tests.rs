//! Unit tests for the guard crate

#[cfg(test)]
mod store_tests {
    use crate::error::GuardError;
    use crate::store::CsrfTokenStore;
    use std::time::Duration;

    fn store() -> CsrfTokenStore {
        CsrfTokenStore::new(Duration::from_secs(3600))
    }

    #[test]
    fn test_issue_returns_hex_token() {
        let store = store();
        let token = store.issue("sess-1");

        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_issue_replaces_previous_token() {
        let store = store();
        let first = store.issue("sess-1");
        let second = store.issue("sess-1");

        assert_ne!(first, second);
        assert_eq!(store.len(), 1);
        assert!(matches!(
            store.validate_and_rotate("sess-1", &first),
            Err(GuardError::TokenMismatch)
        ));
        assert!(store.validate_and_rotate("sess-1", &second).is_ok());
    }

    #[test]
    fn test_rotation_kills_consumed_token() {
        let store = store();
        let token = store.issue("sess-1");

        let rotated = store.validate_and_rotate("sess-1", &token).unwrap();
        assert_ne!(rotated, token);

        // Replay of the consumed token
        assert!(matches!(
            store.validate_and_rotate("sess-1", &token),
            Err(GuardError::TokenMismatch)
        ));
        // The rotated token is live
        assert!(store.validate_and_rotate("sess-1", &rotated).is_ok());
    }

    #[test]
    fn test_unknown_session() {
        let store = store();
        assert!(matches!(
            store.validate_and_rotate("ghost", "anything"),
            Err(GuardError::UnknownSession)
        ));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = store();
        let a = store.issue("sess-a");
        let _b = store.issue("sess-b");

        assert!(matches!(
            store.validate_and_rotate("sess-b", &a),
            Err(GuardError::TokenMismatch)
        ));
        assert!(store.validate_and_rotate("sess-a", &a).is_ok());
    }

    #[test]
    fn test_expired_token_rejected_and_removed() {
        let store = store();
        let token = store.issue("sess-1");
        store.backdate("sess-1", Duration::from_secs(3601));

        assert!(matches!(
            store.validate_and_rotate("sess-1", &token),
            Err(GuardError::TokenExpired)
        ));
        // Entry is gone, not just refused
        assert!(matches!(
            store.validate_and_rotate("sess-1", &token),
            Err(GuardError::UnknownSession)
        ));
    }

    #[test]
    fn test_sweep_expired() {
        let store = store();
        store.issue("old");
        store.issue("fresh");
        store.backdate("old", Duration::from_secs(7200));

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
    }
}

#[cfg(test)]
mod sweeper_tests {
    use crate::sweeper::spawn_limiter_purge;
    use platform::rate_limit::{FixedWindowLimiter, RateLimitConfig};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_limiter_purge_task_drops_stale_slots() {
        // Zero-length window so every slot is stale by the next tick
        let limiter = Arc::new(FixedWindowLimiter::new(RateLimitConfig::new(5, 0)));
        assert!(limiter.check("client-a").allowed);
        assert!(limiter.check("client-b").allowed);
        assert_eq!(limiter.len(), 2);

        let handle = spawn_limiter_purge(Arc::clone(&limiter), Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(limiter.is_empty());
        handle.abort();
    }
}

#[cfg(test)]
mod middleware_tests {
    use crate::config::GuardConfig;
    use crate::handlers::GuardState;
    use crate::middleware::{RateLimitState, enforce_rate_limit, require_csrf_token};
    use crate::router::guard_router;
    use axum::http::{Request, StatusCode};
    use axum::response::IntoResponse;
    use axum::{Router, body::Body, middleware::from_fn_with_state, routing::post};
    use platform::rate_limit::{FixedWindowLimiter, RateLimitConfig};
    use tower::ServiceExt;

    async fn ok_handler() -> impl IntoResponse {
        StatusCode::NO_CONTENT
    }

    fn protected_app(state: GuardState) -> Router {
        Router::new()
            .route("/mutate", post(ok_handler))
            .layer(from_fn_with_state(state.clone(), require_csrf_token))
            .merge(guard_router(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_issue_endpoint_requires_session_header() {
        let app = protected_app(GuardState::new(GuardConfig::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/csrf-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("Session"));
    }

    #[tokio::test]
    async fn test_full_issue_validate_rotate_cycle() {
        let state = GuardState::new(GuardConfig::default());
        let app = protected_app(state.clone());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/csrf-token")
                    .header("x-session-id", "sess-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let token = body_json(response).await["csrfToken"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mutate")
                    .header("x-session-id", "sess-1")
                    .header("x-csrf-token", &token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Replacement token arrives on the response
        let rotated = response
            .headers()
            .get("x-csrf-token")
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert_ne!(rotated, token);

        // The consumed token is dead
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mutate")
                    .header("x-session-id", "sess-1")
                    .header("x-csrf-token", &token)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // The rotated one works
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mutate")
                    .header("x-session-id", "sess-1")
                    .header("x-csrf-token", &rotated)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_mutating_request_without_session_header_is_rejected() {
        let app = protected_app(GuardState::new(GuardConfig::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mutate")
                    .header("x-csrf-token", "deadbeef")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Hard failure, no fallback to client address
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_mutating_request_without_token_is_rejected() {
        let app = protected_app(GuardState::new(GuardConfig::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mutate")
                    .header("x-session-id", "sess-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid CSRF token");
    }

    #[tokio::test]
    async fn test_safe_methods_bypass_csrf() {
        let state = GuardState::new(GuardConfig::default());
        let app = Router::new()
            .route("/read", axum::routing::get(ok_handler))
            .layer(from_fn_with_state(state, require_csrf_token));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/read")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_enforcement_can_be_disabled() {
        let app = protected_app(GuardState::new(GuardConfig::permissive()));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/mutate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_rate_limit_allows_then_rejects() {
        let state = RateLimitState::new(FixedWindowLimiter::new(RateLimitConfig::new(2, 60)));
        let app = Router::new()
            .route("/login", post(ok_handler))
            .layer(from_fn_with_state(state, enforce_rate_limit));

        for expected_remaining in ["1", "0"] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/login")
                        .header("x-forwarded-for", "203.0.113.9")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NO_CONTENT);
            assert_eq!(response.headers()["ratelimit-limit"], "2");
            assert_eq!(response.headers()["ratelimit-remaining"], expected_remaining);
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("x-forwarded-for", "203.0.113.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()["ratelimit-remaining"], "0");
        let body = body_json(response).await;
        assert_eq!(body["error"], "Too many requests, please try again later.");

        // A different client has its own window
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("x-forwarded-for", "203.0.113.10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::GuardError;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_codes() {
        let cases: Vec<(GuardError, StatusCode)> = vec![
            (GuardError::MissingSessionHeader, StatusCode::BAD_REQUEST),
            (GuardError::MissingToken, StatusCode::FORBIDDEN),
            (GuardError::UnknownSession, StatusCode::FORBIDDEN),
            (GuardError::TokenMismatch, StatusCode::FORBIDDEN),
            (GuardError::TokenExpired, StatusCode::FORBIDDEN),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status_code(), expected);
            let response = error.into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
