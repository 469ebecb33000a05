//! Schema manager — table creation and additive migration.
//!
//! `ensure_schema` is idempotent and runs on every startup. Older ledgers
//! predate the team/sport/parlay columns; those are patched in with
//! `ALTER TABLE ADD COLUMN` and neutral defaults. Existing columns and row
//! content are never dropped, renamed, or rewritten. Each addition is
//! checked against `PRAGMA table_info` first and is individually
//! idempotent, so the migration has no ordering or retry concerns.

use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::types::Result;

/// Full current shape of the bets table.
const CREATE_BETS: &str = r#"
CREATE TABLE IF NOT EXISTS bets (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    date        TEXT NOT NULL,
    team_a      TEXT NOT NULL DEFAULT '',
    team_b      TEXT NOT NULL DEFAULT '',
    bet_type    TEXT NOT NULL DEFAULT '',
    sport       TEXT NOT NULL DEFAULT '',
    stake       REAL NOT NULL,
    odds        REAL NOT NULL,
    result      TEXT NOT NULL,
    profit_loss REAL NOT NULL,
    notes       TEXT NOT NULL DEFAULT '',
    is_parlay   INTEGER NOT NULL DEFAULT 0,
    parlay_legs TEXT
)
"#;

const CREATE_QUOTES: &str = r#"
CREATE TABLE IF NOT EXISTS quotes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp  TEXT NOT NULL,
    quote_text TEXT NOT NULL,
    category   TEXT NOT NULL DEFAULT 'Motivation'
)
"#;

const CREATE_BANKROLL: &str = r#"
CREATE TABLE IF NOT EXISTS bankroll (
    id      INTEGER PRIMARY KEY,
    balance REAL NOT NULL
)
"#;

/// Columns added after the original single-bet schema, with the
/// declaration used when patching an old table. SQLite applies the
/// DEFAULT to pre-existing rows, giving legacy records neutral values.
const ADDITIVE_COLUMNS: &[(&str, &str)] = &[
    ("team_a", "TEXT NOT NULL DEFAULT ''"),
    ("team_b", "TEXT NOT NULL DEFAULT ''"),
    ("bet_type", "TEXT NOT NULL DEFAULT ''"),
    ("sport", "TEXT NOT NULL DEFAULT ''"),
    ("is_parlay", "INTEGER NOT NULL DEFAULT 0"),
    ("parlay_legs", "TEXT"),
];

/// Ensure all tables exist and the bets table carries the full column set.
///
/// Safe to call on every startup. Never touches bet or quote content, and
/// never resets an existing bankroll balance.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<()> {
    if bets_table_exists(pool).await? {
        migrate_bets_table(pool).await?;
    } else {
        sqlx::query(CREATE_BETS).execute(pool).await?;
        info!("Created bets table");
    }

    sqlx::query(CREATE_QUOTES).execute(pool).await?;
    sqlx::query(CREATE_BANKROLL).execute(pool).await?;

    // Seed the single bankroll row at zero, only when absent.
    sqlx::query("INSERT OR IGNORE INTO bankroll (id, balance) VALUES (1, 0)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn bets_table_exists(pool: &SqlitePool) -> Result<bool> {
    let row = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'bets'")
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Append any missing additive column to an existing bets table.
async fn migrate_bets_table(pool: &SqlitePool) -> Result<()> {
    let existing = table_columns(pool, "bets").await?;

    for (name, decl) in ADDITIVE_COLUMNS {
        if existing.contains(*name) {
            debug!(column = name, "Column already present");
            continue;
        }
        sqlx::query(&format!("ALTER TABLE bets ADD COLUMN {name} {decl}"))
            .execute(pool)
            .await?;
        info!(column = name, "Migrated bets table: added column");
    }

    Ok(())
}

/// Current column names of a table, via `PRAGMA table_info`.
async fn table_columns(pool: &SqlitePool, table: &str) -> Result<HashSet<String>> {
    let rows = sqlx::query(&format!("PRAGMA table_info({table})"))
        .fetch_all(pool)
        .await?;
    rows.iter()
        .map(|row| row.try_get::<String, _>("name").map_err(Into::into))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Store;

    /// The pre-migration schema: single bets only, no team/sport/parlay
    /// columns.
    const LEGACY_BETS: &str = r#"
    CREATE TABLE bets (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        date        TEXT,
        stake       REAL,
        odds        REAL,
        result      TEXT,
        profit_loss REAL,
        notes       TEXT
    )
    "#;

    async fn raw_store() -> Store {
        // Bypass Store::open_in_memory so the schema is NOT ensured yet.
        use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();
        Store { pool }
    }

    #[tokio::test]
    async fn test_fresh_database_gets_full_schema() {
        let store = raw_store().await;
        ensure_schema(store.pool()).await.unwrap();

        let columns = table_columns(store.pool(), "bets").await.unwrap();
        for (name, _) in ADDITIVE_COLUMNS {
            assert!(columns.contains(*name), "missing column {name}");
        }
        assert!(columns.contains("stake"));
        assert!(columns.contains("profit_loss"));
    }

    #[tokio::test]
    async fn test_legacy_table_is_patched_additively() {
        let store = raw_store().await;
        sqlx::query(LEGACY_BETS).execute(store.pool()).await.unwrap();
        sqlx::query(
            "INSERT INTO bets (date, stake, odds, result, profit_loss, notes)
             VALUES ('2024-11-02', 40, 1.8, 'Win', 32, 'legacy row')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        ensure_schema(store.pool()).await.unwrap();

        let columns = table_columns(store.pool(), "bets").await.unwrap();
        for (name, _) in ADDITIVE_COLUMNS {
            assert!(columns.contains(*name), "missing column {name}");
        }

        // The legacy row survived with neutral defaults in the new columns.
        let row = sqlx::query("SELECT * FROM bets WHERE notes = 'legacy row'")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(row.try_get::<f64, _>("stake").unwrap(), 40.0);
        assert_eq!(row.try_get::<String, _>("team_a").unwrap(), "");
        assert_eq!(row.try_get::<i64, _>("is_parlay").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let store = raw_store().await;
        sqlx::query(LEGACY_BETS).execute(store.pool()).await.unwrap();
        sqlx::query(
            "INSERT INTO bets (date, stake, odds, result, profit_loss, notes)
             VALUES ('2024-11-02', 40, 1.8, 'Win', 32, 'legacy row')",
        )
        .execute(store.pool())
        .await
        .unwrap();

        ensure_schema(store.pool()).await.unwrap();
        let columns_first = table_columns(store.pool(), "bets").await.unwrap();

        // Second run leaves the field set and row values unchanged.
        ensure_schema(store.pool()).await.unwrap();
        let columns_second = table_columns(store.pool(), "bets").await.unwrap();
        assert_eq!(columns_first, columns_second);

        let row = sqlx::query("SELECT stake, result FROM bets WHERE notes = 'legacy row'")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(row.try_get::<f64, _>("stake").unwrap(), 40.0);
        assert_eq!(row.try_get::<String, _>("result").unwrap(), "Win");
    }

    #[tokio::test]
    async fn test_existing_bankroll_balance_is_never_reset() {
        let store = raw_store().await;
        ensure_schema(store.pool()).await.unwrap();
        sqlx::query("UPDATE bankroll SET balance = 250 WHERE id = 1")
            .execute(store.pool())
            .await
            .unwrap();

        ensure_schema(store.pool()).await.unwrap();

        let row = sqlx::query("SELECT balance FROM bankroll WHERE id = 1")
            .fetch_one(store.pool())
            .await
            .unwrap();
        assert_eq!(row.try_get::<f64, _>("balance").unwrap(), 250.0);
    }
}
