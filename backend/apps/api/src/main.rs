//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use std::net::SocketAddr;
use std::sync::Arc;

use api::{AppConfig, RouterDeps, build_router};
use auth::PgUserRepository;
use guard::{GuardConfig, GuardState, spawn_limiter_purge, spawn_sweeper};
use guard::middleware::RateLimitState;
use kernel::error::app_error::set_expose_internals;
use ledger::{PgTransactionRepository, ReceiptStore};
use platform::rate_limit::{FixedWindowLimiter, RateLimitConfig};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,ledger=info,guard=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    set_expose_internals(config.expose_internals);

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Receipt storage
    let receipts = ReceiptStore::new(config.upload_dir.clone());
    receipts.ensure_dir().await?;

    // CSRF guard with its background sweeper
    let guard_config = GuardConfig {
        enforce: config.csrf_enforce,
        ..GuardConfig::default()
    };
    let sweep_interval = guard_config.sweep_interval;
    let guard_state = GuardState::new(guard_config);
    spawn_sweeper(Arc::clone(&guard_state.store), sweep_interval);

    // Rate limiters with their background purge tasks
    let general_limiter = Arc::new(FixedWindowLimiter::new(RateLimitConfig::general()));
    let auth_limiter = Arc::new(FixedWindowLimiter::new(RateLimitConfig::auth()));
    spawn_limiter_purge(Arc::clone(&general_limiter), sweep_interval);
    spawn_limiter_purge(Arc::clone(&auth_limiter), sweep_interval);

    let deps = RouterDeps {
        user_repo: PgUserRepository::new(pool.clone()),
        tx_repo: PgTransactionRepository::new(pool),
        receipts,
        guard: guard_state,
        general_limiter: RateLimitState {
            limiter: general_limiter,
        },
        auth_limiter: RateLimitState {
            limiter: auth_limiter,
        },
        frontend_origin: config.frontend_origin.clone(),
    };

    let app = build_router(deps);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
