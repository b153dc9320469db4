//! PostgreSQL Repository Implementation

use chrono::NaiveDate;
use sqlx::PgPool;
use std::str::FromStr;

use crate::domain::entity::{NewTransaction, Totals, Transaction, TransactionType};
use crate::domain::repository::TransactionRepository;
use crate::error::LedgerResult;

/// PostgreSQL-backed transaction repository
#[derive(Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TransactionRepository for PgTransactionRepository {
    async fn insert(&self, tx: &NewTransaction) -> LedgerResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO transactions (
                user_id, type, description, amount, category, date, receipt_file
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(tx.user_id)
        .bind(tx.kind.as_str())
        .bind(&tx.description)
        .bind(tx.amount)
        .bind(&tx.category)
        .bind(tx.date)
        .bind(&tx.receipt_file)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_by_user(&self, user_id: i64) -> LedgerResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
            SELECT id, user_id, type, description, amount, category, date, receipt_file
            FROM transactions
            WHERE user_id = $1
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_transaction).collect()
    }

    async fn delete_by_id(&self, id: i64) -> LedgerResult<u64> {
        let removed = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(removed)
    }

    async fn aggregate_by_user(&self, user_id: i64) -> LedgerResult<Totals> {
        let (total_income, total_expense) = sqlx::query_as::<_, (f64, f64)>(
            r#"
            SELECT
                COALESCE(SUM(amount) FILTER (WHERE type = 'income'), 0)::DOUBLE PRECISION,
                COALESCE(SUM(amount) FILTER (WHERE type = 'expense'), 0)::DOUBLE PRECISION
            FROM transactions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Totals {
            total_income,
            total_expense,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    user_id: i64,
    #[sqlx(rename = "type")]
    kind: String,
    description: String,
    amount: f64,
    category: String,
    date: NaiveDate,
    receipt_file: Option<String>,
}

impl TransactionRow {
    fn into_transaction(self) -> LedgerResult<Transaction> {
        Ok(Transaction {
            id: self.id,
            user_id: self.user_id,
            kind: TransactionType::from_str(&self.kind)?,
            description: self.description,
            amount: self.amount,
            category: self.category,
            date: self.date,
            receipt_file: self.receipt_file,
        })
    }
}
