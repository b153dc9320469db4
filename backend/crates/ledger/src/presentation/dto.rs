//! Request/Response DTOs

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entity::{Totals, Transaction, TransactionType};

#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub receipt_file: Option<String>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            user_id: tx.user_id,
            kind: tx.kind,
            description: tx.description,
            amount: tx.amount,
            category: tx.category,
            date: tx.date,
            receipt_file: tx.receipt_file,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub message: String,
    #[serde(rename = "transactionId")]
    pub transaction_id: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Aggregate totals in the legacy client's field names
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(rename = "total_receitas")]
    pub total_income: f64,
    #[serde(rename = "total_despesas")]
    pub total_expense: f64,
    pub saldo: f64,
}

impl From<Totals> for StatsResponse {
    fn from(totals: Totals) -> Self {
        Self {
            total_income: totals.total_income,
            total_expense: totals.total_expense,
            saldo: totals.balance(),
        }
    }
}
