//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate};
use kernel::error::app_error::AppError;
use serde_json::{Map, Value};
use std::str::FromStr;
use std::sync::Arc;

use crate::application::{
    CreateTransactionInput, CreateTransactionUseCase, DeleteTransactionUseCase,
    ListTransactionsUseCase, ReceiptUpload, StatsUseCase,
};
use crate::domain::entity::TransactionType;
use crate::domain::repository::TransactionRepository;
use crate::infra::receipts::ReceiptStore;
use crate::presentation::dto::{
    CreateResponse, MessageResponse, StatsResponse, TransactionResponse,
};
use crate::presentation::rules::{
    TRANSACTION_FIELDS, str_field, transaction_specs, validated_body,
};

/// Multipart field carrying the receipt file
const RECEIPT_FIELD: &str = "receipt";

/// Shared state for ledger handlers
#[derive(Clone)]
pub struct LedgerAppState<R>
where
    R: TransactionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub receipts: Arc<ReceiptStore>,
}

/// POST /transactions (multipart)
pub async fn create<R>(
    State(state): State<LedgerAppState<R>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CreateResponse>), AppError>
where
    R: TransactionRepository + Clone + Send + Sync + 'static,
{
    let mut record = Map::new();
    let mut receipt: Option<ReceiptUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RECEIPT_FIELD {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}")))?;
            if !bytes.is_empty() {
                receipt = Some(ReceiptUpload {
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {e}")))?;
            record.insert(name, Value::String(text));
        }
    }

    let record = validated_body(Value::Object(record), TRANSACTION_FIELDS, &transaction_specs())?;

    let use_case = CreateTransactionUseCase::new(state.repo.clone(), state.receipts.clone());
    let id = use_case
        .execute(CreateTransactionInput {
            user_id: parse_i64(&record, "userId")?,
            kind: TransactionType::from_str(&str_field(&record, "type"))
                .map_err(|_| AppError::bad_request("type must be income or expense"))?,
            description: str_field(&record, "description"),
            amount: parse_f64(&record, "amount")?,
            category: str_field(&record, "category"),
            date: parse_date(&str_field(&record, "date"))?,
            receipt,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            message: "Transaction created successfully".to_string(),
            transaction_id: id,
        }),
    ))
}

/// GET /transactions/{userId}
pub async fn list<R>(
    State(state): State<LedgerAppState<R>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<TransactionResponse>>, AppError>
where
    R: TransactionRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListTransactionsUseCase::new(state.repo.clone());
    let transactions = use_case.execute(user_id).await?;

    Ok(Json(
        transactions.into_iter().map(TransactionResponse::from).collect(),
    ))
}

/// DELETE /transactions/{id}
pub async fn remove<R>(
    State(state): State<LedgerAppState<R>>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError>
where
    R: TransactionRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteTransactionUseCase::new(state.repo.clone());
    use_case.execute(id).await?;

    Ok(Json(MessageResponse {
        message: "Transaction deleted successfully".to_string(),
    }))
}

/// GET /stats/{userId}
pub async fn stats<R>(
    State(state): State<LedgerAppState<R>>,
    Path(user_id): Path<i64>,
) -> Result<Json<StatsResponse>, AppError>
where
    R: TransactionRepository + Clone + Send + Sync + 'static,
{
    let use_case = StatsUseCase::new(state.repo.clone());
    let totals = use_case.execute(user_id).await?;

    Ok(Json(StatsResponse::from(totals)))
}

// Validation already vouched for these shapes; failures here mean the
// rules and the parsers drifted apart.

fn parse_i64(record: &Map<String, Value>, name: &str) -> Result<i64, AppError> {
    str_field(record, name)
        .parse()
        .map_err(|_| AppError::bad_request(format!("{name} must be an integer")))
}

fn parse_f64(record: &Map<String, Value>, name: &str) -> Result<f64, AppError> {
    str_field(record, name)
        .parse()
        .map_err(|_| AppError::bad_request(format!("{name} must be a number")))
}

fn parse_date(text: &str) -> Result<NaiveDate, AppError> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.date_naive())
        .map_err(|_| AppError::bad_request("date must be an ISO-8601 date"))
}
