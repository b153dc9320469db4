//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use serde_json::Value;
use std::sync::Arc;

use crate::application::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};
use crate::domain::repository::UserRepository;
use crate::presentation::dto::{LoginResponse, RegisterResponse};
use crate::presentation::rules::{
    LOGIN_FIELDS, REGISTER_FIELDS, login_specs, register_specs, str_field, validated_body,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let record = validated_body(body, REGISTER_FIELDS, &register_specs())?;

    let use_case = RegisterUseCase::new(state.repo.clone());
    let output = use_case
        .execute(RegisterInput {
            name: str_field(&record, "name"),
            email: str_field(&record, "email"),
            password: str_field(&record, "password"),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: output.user_id,
        }),
    ))
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(body): Json<Value>,
) -> Result<Json<LoginResponse>, AppError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let record = validated_body(body, LOGIN_FIELDS, &login_specs())?;

    let use_case = LoginUseCase::new(state.repo.clone());
    let output = use_case
        .execute(LoginInput {
            email: str_field(&record, "email"),
            password: str_field(&record, "password"),
        })
        .await?;

    Ok(Json(LoginResponse {
        id: output.id,
        name: output.name,
        email: output.email,
    }))
}
