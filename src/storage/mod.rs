//! Persistence layer.
//!
//! SQLite via sqlx. The pool is capped at a single connection: the tool is
//! single-user, and one connection serializes mutating operations even if
//! two browser tabs hit the API at once. Every operation acquires the
//! connection, runs one short statement, and releases it.

pub mod bankroll;
pub mod bets;
pub mod quotes;
pub mod schema;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use crate::types::Result;

/// Handle to the betting ledger database.
///
/// Cheap to clone; all clones share the same underlying pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (or create) the database file at `path` and ensure the schema
    /// is current. Any storage error here is fatal to startup.
    pub async fn open(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        schema::ensure_schema(&pool).await?;
        info!(path, "Ledger database ready");
        Ok(Self { pool })
    }

    /// Open an in-memory database (for testing). The single pooled
    /// connection is pinned so the database outlives idle periods.
    pub async fn open_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        schema::ensure_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Direct pool access, used by the schema manager and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let store = Store::open_in_memory().await.unwrap();
        // Schema is in place: the seeded bankroll row is readable.
        let balance = store.get_balance().await.unwrap();
        assert_eq!(balance, 0.0);
    }

    #[tokio::test]
    async fn test_open_file_creates_database() {
        let mut path = std::env::temp_dir();
        path.push(format!("betbook_test_{}.db", std::process::id()));
        let path_str = path.to_string_lossy().to_string();
        let _ = std::fs::remove_file(&path);

        let store = Store::open(&path_str).await.unwrap();
        assert!(path.exists());
        assert!(store.list_bets().await.unwrap().is_empty());

        drop(store);
        let _ = std::fs::remove_file(&path);
    }
}
