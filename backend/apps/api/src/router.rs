//! Router Assembly
//!
//! Everything under `/api`, with the guard layers wrapped around the
//! whole surface: the general rate limit outermost, then CSRF
//! enforcement, then the routes. Receipt files are served read-only
//! under `/uploads`.

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, Request, StatusCode, Uri, header};
use axum::middleware::{Next, from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use auth::domain::repository::UserRepository;
use auth::presentation::handlers::{self as auth_handlers, AuthAppState};
use guard::config::{CSRF_HEADER, SESSION_HEADER};
use guard::middleware::{RateLimitState, enforce_rate_limit, require_csrf_token};
use guard::{GuardState, guard_router};
use ledger::ReceiptStore;
use ledger::domain::repository::TransactionRepository;
use ledger::presentation::handlers::{self as ledger_handlers, LedgerAppState};

/// Receipt uploads cap the request body
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;

/// Everything the router needs, injected by `main` or by tests
pub struct RouterDeps<U, T>
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TransactionRepository + Clone + Send + Sync + 'static,
{
    pub user_repo: U,
    pub tx_repo: T,
    pub receipts: ReceiptStore,
    pub guard: GuardState,
    pub general_limiter: RateLimitState,
    pub auth_limiter: RateLimitState,
    pub frontend_origin: String,
}

/// Assemble the full application router
pub fn build_router<U, T>(deps: RouterDeps<U, T>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    T: TransactionRepository + Clone + Send + Sync + 'static,
{
    let upload_dir = deps.receipts.dir().to_path_buf();

    let auth_state = AuthAppState {
        repo: Arc::new(deps.user_repo),
    };
    let ledger_state = LedgerAppState {
        repo: Arc::new(deps.tx_repo),
        receipts: Arc::new(deps.receipts),
    };

    let register_routes = Router::new()
        .route("/register", post(auth_handlers::register::<U>))
        .with_state(auth_state.clone());

    // Login carries the strict window on top of the general one
    let login_routes = Router::new()
        .route("/login", post(auth_handlers::login::<U>))
        .route_layer(from_fn_with_state(deps.auth_limiter, enforce_rate_limit))
        .with_state(auth_state);

    let ledger_routes = Router::new()
        .route("/transactions", post(ledger_handlers::create::<T>))
        .route(
            "/transactions/{id}",
            get(ledger_handlers::list::<T>).delete(ledger_handlers::remove::<T>),
        )
        .route("/stats/{id}", get(ledger_handlers::stats::<T>))
        .with_state(ledger_state);

    let api = Router::new()
        .route("/", get(banner))
        .merge(guard_router(deps.guard.clone()))
        .merge(register_routes)
        .merge(login_routes)
        .merge(ledger_routes)
        .layer(from_fn_with_state(deps.guard, require_csrf_token))
        .layer(from_fn_with_state(deps.general_limiter, enforce_rate_limit));

    let uploads = Router::new()
        .fallback_service(ServeDir::new(upload_dir))
        .layer(from_fn(reject_dotfiles));

    let origin: HeaderValue = deps
        .frontend_origin
        .parse()
        .unwrap_or_else(|_| HeaderValue::from_static("http://localhost:3000"));

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            SESSION_HEADER.clone(),
            CSRF_HEADER.clone(),
        ]))
        .allow_credentials(true)
        // The rotated token must be readable by the browser client
        .expose_headers([CSRF_HEADER.clone()]);

    Router::new()
        .nest("/api", api)
        .nest("/uploads", uploads)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// GET /api
async fn banner() -> Json<Value> {
    Json(json!({
        "message": "Personal Finance API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path(),
        })),
    )
}

/// Hidden files under /uploads are never served
async fn reject_dotfiles(req: Request<Body>, next: Next) -> Response {
    let hidden = req
        .uri()
        .path()
        .split('/')
        .any(|segment| segment.starts_with('.'));

    if hidden {
        let (status, body) = not_found(req.uri().clone()).await;
        return (status, body).into_response();
    }
    next.run(req).await
}
