//! Bankroll ledger — a single running balance.
//!
//! Deposits and withdrawals are manual; bet settlement never touches the
//! balance. The single conceptual row is seeded at zero by the schema
//! manager and mutated in place for the life of the store. The balance
//! may go negative; no floor is enforced at this layer.

use sqlx::Row;
use tracing::info;

use crate::types::{BankrollOp, Result};

use super::Store;

impl Store {
    /// Current balance. Zero if the row is somehow missing.
    pub async fn get_balance(&self) -> Result<f64> {
        let row = sqlx::query("SELECT balance FROM bankroll WHERE id = 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(match row {
            Some(r) => r.try_get("balance")?,
            None => 0.0,
        })
    }

    /// Apply a mutation to the balance and return the result.
    pub async fn adjust_balance(&self, amount: f64, op: BankrollOp) -> Result<f64> {
        let sql = match op {
            BankrollOp::Add => "UPDATE bankroll SET balance = balance + ? WHERE id = 1",
            BankrollOp::Subtract => "UPDATE bankroll SET balance = balance - ? WHERE id = 1",
            BankrollOp::Set => "UPDATE bankroll SET balance = ? WHERE id = 1",
        };
        sqlx::query(sql).bind(amount).execute(&self.pool).await?;

        let balance = self.get_balance().await?;
        info!(op = %op, amount, balance, "Bankroll adjusted");
        Ok(balance)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
