//! End-to-end tests over the assembled router
//!
//! Drives the full middleware stack (rate limit, CSRF, routes) with
//! in-memory repositories, the way the real frontend talks to the API.

use std::sync::{Arc, Mutex};

use api::{RouterDeps, build_router};
use auth::domain::entity::user::{NewUser, User};
use auth::domain::repository::UserRepository;
use auth::error::AuthResult;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use guard::{GuardConfig, GuardState};
use guard::middleware::RateLimitState;
use ledger::ReceiptStore;
use ledger::domain::entity::{NewTransaction, Totals, Transaction, TransactionType};
use ledger::domain::repository::TransactionRepository;
use ledger::error::LedgerResult;
use platform::rate_limit::{FixedWindowLimiter, RateLimitConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Clone, Default)]
struct MemUserRepo {
    users: Arc<Mutex<Vec<User>>>,
}

impl UserRepository for MemUserRepo {
    async fn create(&self, user: &NewUser) -> AuthResult<i64> {
        let mut users = self.users.lock().unwrap();
        let id = users.len() as i64 + 1;
        users.push(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
        });
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email.as_str() == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email.as_str() == email))
    }
}

#[derive(Clone, Default)]
struct MemTxRepo {
    rows: Arc<Mutex<Vec<Transaction>>>,
}

impl TransactionRepository for MemTxRepo {
    async fn insert(&self, tx: &NewTransaction) -> LedgerResult<i64> {
        let mut rows = self.rows.lock().unwrap();
        let id = rows.len() as i64 + 1;
        rows.push(Transaction {
            id,
            user_id: tx.user_id,
            kind: tx.kind,
            description: tx.description.clone(),
            amount: tx.amount,
            category: tx.category.clone(),
            date: tx.date,
            receipt_file: tx.receipt_file.clone(),
        });
        Ok(id)
    }

    async fn list_by_user(&self, user_id: i64) -> LedgerResult<Vec<Transaction>> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<Transaction> = rows
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn delete_by_id(&self, id: i64) -> LedgerResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok((before - rows.len()) as u64)
    }

    async fn aggregate_by_user(&self, user_id: i64) -> LedgerResult<Totals> {
        let rows = self.rows.lock().unwrap();
        let mut totals = Totals::default();
        for t in rows.iter().filter(|t| t.user_id == user_id) {
            match t.kind {
                TransactionType::Income => totals.total_income += t.amount,
                TransactionType::Expense => totals.total_expense += t.amount,
            }
        }
        Ok(totals)
    }
}

fn temp_receipts() -> ReceiptStore {
    let dir = std::env::temp_dir().join(format!("api-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    ReceiptStore::new(dir)
}

fn test_app(guard_config: GuardConfig) -> Router {
    build_router(RouterDeps {
        user_repo: MemUserRepo::default(),
        tx_repo: MemTxRepo::default(),
        receipts: temp_receipts(),
        guard: GuardState::new(guard_config),
        general_limiter: RateLimitState::new(FixedWindowLimiter::new(RateLimitConfig::general())),
        auth_limiter: RateLimitState::new(FixedWindowLimiter::new(RateLimitConfig::auth())),
        frontend_origin: "http://localhost:3000".to_string(),
    })
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// GET with the session header set
async fn get_with_session(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("x-session-id", "sess-e2e")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn post_json(
    app: &Router,
    uri: &str,
    csrf_token: &str,
    body: Value,
) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-session-id", "sess-e2e")
                .header("x-csrf-token", csrf_token)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

fn rotated_token(response: &axum::response::Response) -> String {
    response
        .headers()
        .get("x-csrf-token")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string()
}

const BOUNDARY: &str = "e2e-boundary-41ac";

fn multipart_transaction(user_id: i64) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [
        ("userId", user_id.to_string().as_str()),
        ("type", "income"),
        ("description", "Monthly salary"),
        ("amount", "100.00"),
        ("category", "Salary"),
        ("date", "2024-03-01"),
    ] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"receipt\"; \
             filename=\"receipt.pdf\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 proof\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

#[tokio::test]
async fn test_register_login_transact_flow() {
    let app = test_app(GuardConfig::default());

    // Obtain the first CSRF token
    let response = get_with_session(&app, "/api/csrf-token").await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = read_json(response).await["csrfToken"]
        .as_str()
        .unwrap()
        .to_string();

    // Register
    let response = post_json(
        &app,
        "/api/register",
        &token,
        json!({"name": "Ana Souza", "email": "ana@example.com", "password": "Secret1x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let token = rotated_token(&response);
    let body = read_json(response).await;
    assert_eq!(body["userId"], 1);

    // Login with the rotated token
    let response = post_json(
        &app,
        "/api/login",
        &token,
        json!({"email": "ana@example.com", "password": "Secret1x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = rotated_token(&response);
    let body = read_json(response).await;
    assert_eq!(body["name"], "Ana Souza");

    // Create a transaction with a PDF receipt
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .header("x-session-id", "sess-e2e")
                .header("x-csrf-token", &token)
                .body(Body::from(multipart_transaction(1)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Reads need no token
    let response = get_with_session(&app, "/api/transactions/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let response = get_with_session(&app, "/api/stats/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["total_receitas"], 100.0);
    assert_eq!(body["total_despesas"], 0.0);
    assert_eq!(body["saldo"], 100.0);
}

#[tokio::test]
async fn test_mutation_without_csrf_token_is_forbidden() {
    let app = test_app(GuardConfig::default());

    // Session header present, token absent
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header(header::CONTENT_TYPE, "application/json")
                .header("x-session-id", "sess-e2e")
                .body(Body::from(
                    json!({"name": "Ana", "email": "a@b.com", "password": "Secret1x"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // No session header at all
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_csrf_enforcement_can_be_disabled() {
    let app = test_app(GuardConfig::permissive());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"name": "Ana Souza", "email": "ana@example.com", "password": "Secret1x"})
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_banner_and_unknown_route() {
    let app = test_app(GuardConfig::default());

    let response = get_with_session(&app, "/api").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Personal Finance API");
    assert!(body["version"].is_string());

    let response = get_with_session(&app, "/api/no-such-route").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["path"], "/api/no-such-route");
}

#[tokio::test]
async fn test_uploads_rejects_dotfiles() {
    let app = test_app(GuardConfig::default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/uploads/.env")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rate_limit_headers_present() {
    let app = test_app(GuardConfig::default());

    let response = get_with_session(&app, "/api/csrf-token").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["ratelimit-limit"], "100");
    assert!(response.headers().contains_key("ratelimit-remaining"));
    assert!(response.headers().contains_key("ratelimit-reset"));
}

#[tokio::test]
async fn test_login_rate_limit_rejects_sixth_attempt() {
    let app = test_app(GuardConfig::permissive());

    let body = json!({"email": "ghost@example.com", "password": "Wrong1xx"});
    for _ in 0..5 {
        let response = post_json(&app, "/api/login", "unused", body.clone()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = post_json(&app, "/api/login", "unused", body.clone()).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = read_json(response).await;
    assert_eq!(json["error"], "Too many requests, please try again later.");
}
