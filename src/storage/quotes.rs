//! Motivational quote store.

use chrono::{DateTime, Utc};
use sqlx::Row;
use tracing::info;

use crate::types::{LedgerError, Quote, QuoteCategory, Result};

use super::Store;

impl Store {
    /// Save a quote, stamped with the current UTC time. Returns its id.
    pub async fn add_quote(&self, text: &str, category: QuoteCategory) -> Result<i64> {
        let res = sqlx::query(
            "INSERT INTO quotes (timestamp, quote_text, category) VALUES (?, ?, ?)",
        )
        .bind(Utc::now())
        .bind(text)
        .bind(category.to_string())
        .execute(&self.pool)
        .await?;

        let id = res.last_insert_rowid();
        info!(id, category = %category, "Quote added");
        Ok(id)
    }

    /// All quotes, newest first.
    pub async fn list_quotes(&self) -> Result<Vec<Quote>> {
        let rows = sqlx::query("SELECT * FROM quotes ORDER BY timestamp DESC, id DESC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(Quote {
                    id: row.try_get("id")?,
                    timestamp: row.try_get::<DateTime<Utc>, _>("timestamp")?,
                    quote_text: row.try_get("quote_text")?,
                    category: row
                        .try_get::<String, _>("category")?
                        .parse()
                        .unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Delete a quote by id.
    pub async fn delete_quote(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM quotes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(LedgerError::QuoteNotFound(id));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_and_list() {
        let store = Store::open_in_memory().await.unwrap();
        let id = store
            .add_quote("Discipline beats motivation.", QuoteCategory::Discipline)
            .await
            .unwrap();

        let quotes = store.list_quotes().await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].id, id);
        assert_eq!(quotes[0].quote_text, "Discipline beats motivation.");
        assert_eq!(quotes[0].category, QuoteCategory::Discipline);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let store = Store::open_in_memory().await.unwrap();
        store.add_quote("first", QuoteCategory::Other).await.unwrap();
        store.add_quote("second", QuoteCategory::Other).await.unwrap();

        let quotes = store.list_quotes().await.unwrap();
        assert_eq!(quotes[0].quote_text, "second");
        assert_eq!(quotes[1].quote_text, "first");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = Store::open_in_memory().await.unwrap();
        let id = store.add_quote("gone soon", QuoteCategory::Mindset).await.unwrap();
        store.delete_quote(id).await.unwrap();
        assert!(store.list_quotes().await.unwrap().is_empty());

        let err = store.delete_quote(id).await.unwrap_err();
        assert!(matches!(err, LedgerError::QuoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_category_reads_as_default() {
        let store = Store::open_in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO quotes (timestamp, quote_text, category)
             VALUES (?, 'legacy', 'Fortune')",
        )
        .bind(Utc::now())
        .execute(store.pool())
        .await
        .unwrap();

        let quotes = store.list_quotes().await.unwrap();
        assert_eq!(quotes[0].category, QuoteCategory::Motivation);
    }
}
