//! Domain Entities

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(LedgerError::Internal(format!(
                "unknown transaction type: {other}"
            ))),
        }
    }
}

/// A persisted transaction
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub kind: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    /// Stored receipt filename, when one was uploaded
    pub receipt_file: Option<String>,
}

/// Transaction to be persisted; the database assigns the id
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: i64,
    pub kind: TransactionType,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub receipt_file: Option<String>,
}

/// Per-user aggregate totals
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total_income: f64,
    pub total_expense: f64,
}

impl Totals {
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expense
    }
}
