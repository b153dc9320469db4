//! Application Configuration
//!
//! Environment-driven settings. Database credentials are required;
//! everything else has a development default.

use anyhow::Context;
use std::env;
use std::path::PathBuf;

/// API application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origin: String,
    pub upload_dir: PathBuf,
    pub csrf_enforce: bool,
    /// Whether error responses may carry a `debug` field
    pub expose_internals: bool,
}

impl AppConfig {
    /// Load from the process environment, failing startup on missing
    /// database credentials
    pub fn from_env() -> anyhow::Result<Self> {
        let db_host = required("DB_HOST")?;
        let db_user = required("DB_USER")?;
        let db_password = required("DB_PASSWORD")?;
        let db_name = required("DB_NAME")?;
        let db_port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());

        let database_url =
            format!("postgres://{db_user}:{db_password}@{db_host}:{db_port}/{db_name}");

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let frontend_origin =
            env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let upload_dir: PathBuf = env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".to_string())
            .into();

        let csrf_enforce = env::var("CSRF_ENFORCE")
            .map(|v| v != "false")
            .unwrap_or(true);

        let expose_internals = env::var("APP_ENV")
            .map(|v| v != "production")
            .unwrap_or(true);

        Ok(Self {
            database_url,
            port,
            frontend_origin,
            upload_dir,
            csrf_enforce,
            expose_internals,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{name} must be set in environment"))
}
