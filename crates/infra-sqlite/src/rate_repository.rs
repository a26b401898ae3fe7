// SQLite RateStore Implementation

use async_trait::async_trait;
use forex_core::domain::{CurrencyCode, RateTable};
use forex_core::error::{AppError, Result};
use forex_core::port::RateStore;
use sqlx::SqlitePool;
use tracing::{debug, info};

// Helper to convert sqlx::Error to AppError with structured information.
// Every sqlx failure is infrastructure; a missing row is never an error here.
fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "5" => {
                        // SQLITE_BUSY - database is locked
                        AppError::BackingStoreUnavailable(format!(
                            "Database locked (SQLITE_BUSY): {}",
                            db_err.message()
                        ))
                    }
                    "275" | "531" => {
                        // CHECK constraint failed (rate > 0)
                        AppError::BackingStoreUnavailable(format!(
                            "Rate constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    _ => AppError::BackingStoreUnavailable(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::BackingStoreUnavailable(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::PoolClosed => AppError::BackingStoreUnavailable("Pool closed".to_string()),
        sqlx::Error::PoolTimedOut => {
            AppError::BackingStoreUnavailable("Timed out acquiring connection".to_string())
        }
        _ => {
            // Connection, I/O, protocol errors
            AppError::BackingStoreUnavailable(err.to_string())
        }
    }
}

/// Rates persisted in `conversion_rates`, queried per lookup
pub struct SqliteRateStore {
    pool: SqlitePool,
    base: CurrencyCode,
}

impl SqliteRateStore {
    pub fn new(pool: SqlitePool, base: impl Into<String>) -> Self {
        Self {
            pool,
            base: CurrencyCode::new(base),
        }
    }

    /// Check that the base currency row exists with rate 1.0
    pub async fn verify_base(&self) -> Result<()> {
        match self.fetch_rate(&self.base).await? {
            Some(rate) if rate == 1.0 => Ok(()),
            Some(rate) => Err(AppError::Config(format!(
                "Base currency {} has rate {} in store, expected 1.0",
                self.base, rate
            ))),
            None => Err(AppError::Config(format!(
                "Base currency {} missing from rate store",
                self.base
            ))),
        }
    }

    /// Number of stored rates
    pub async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM conversion_rates")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    /// Upsert every entry of `table` in one transaction
    pub async fn seed(&self, table: &RateTable) -> Result<usize> {
        if table.base_currency() != &self.base {
            return Err(AppError::Config(format!(
                "Cannot seed table with base {} into store with base {}",
                table.base_currency(),
                self.base
            )));
        }

        let entries = table.entries();
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        for (code, rate) in &entries {
            sqlx::query(
                r#"
                INSERT INTO conversion_rates (currency_code, rate) VALUES (?, ?)
                ON CONFLICT(currency_code) DO UPDATE SET rate = excluded.rate
                "#,
            )
            .bind(code.as_str())
            .bind(*rate)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        }

        tx.commit().await.map_err(map_sqlx_error)?;

        info!(rates = entries.len(), base = %self.base, "Seeded rate store");
        Ok(entries.len())
    }

    /// Load every row once into an in-memory table
    pub async fn load_table(&self) -> Result<RateTable> {
        self.verify_base().await?;

        let rows: Vec<(String, f64)> =
            sqlx::query_as("SELECT currency_code, rate FROM conversion_rates")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        let table = rows
            .into_iter()
            .fold(RateTable::builder(self.base.as_str()), |builder, (code, rate)| {
                builder.rate(code, rate)
            })
            .build()?;

        info!(rates = table.len(), base = %self.base, "Loaded rate table from store");
        Ok(table)
    }

    async fn fetch_rate(&self, code: &CurrencyCode) -> Result<Option<f64>> {
        sqlx::query_scalar("SELECT rate FROM conversion_rates WHERE currency_code = ?")
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl RateStore for SqliteRateStore {
    fn base_currency(&self) -> &CurrencyCode {
        &self.base
    }

    async fn lookup(&self, code: &CurrencyCode) -> Result<Option<f64>> {
        let rate = self.fetch_rate(code).await?;
        debug!(code = %code, found = rate.is_some(), "Rate lookup");
        Ok(rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};

    async fn setup_test_store() -> SqliteRateStore {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteRateStore::new(pool, "INR")
    }

    #[tokio::test]
    async fn test_seed_and_lookup() {
        let store = setup_test_store().await;
        let seeded = store.seed(&RateTable::reference()).await.unwrap();
        assert_eq!(seeded, 3);
        assert_eq!(store.count().await.unwrap(), 3);

        assert_eq!(store.lookup(&"USD".into()).await.unwrap(), Some(84.08));
        assert_eq!(store.lookup(&"INR".into()).await.unwrap(), Some(1.0));
    }

    #[tokio::test]
    async fn test_missing_row_is_a_miss() {
        let store = setup_test_store().await;
        store.seed(&RateTable::reference()).await.unwrap();

        assert_eq!(store.lookup(&"XYZ".into()).await.unwrap(), None);
        assert_eq!(store.lookup(&"usd".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_seed_upserts() {
        let store = setup_test_store().await;
        store.seed(&RateTable::reference()).await.unwrap();

        let updated = RateTable::builder("INR").rate("USD", 85.0).build().unwrap();
        store.seed(&updated).await.unwrap();

        assert_eq!(store.lookup(&"USD".into()).await.unwrap(), Some(85.0));
        assert_eq!(store.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_seed_rejects_other_base() {
        let store = setup_test_store().await;
        let table = RateTable::builder("EUR").build().unwrap();
        assert!(matches!(store.seed(&table).await, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_verify_base() {
        let store = setup_test_store().await;
        assert!(matches!(store.verify_base().await, Err(AppError::Config(_))));

        store.seed(&RateTable::reference()).await.unwrap();
        store.verify_base().await.unwrap();
    }

    #[tokio::test]
    async fn test_load_table_matches_store() {
        let store = setup_test_store().await;
        store.seed(&RateTable::reference()).await.unwrap();

        let table = store.load_table().await.unwrap();
        assert_eq!(table.entries(), RateTable::reference().entries());
    }

    #[tokio::test]
    async fn test_closed_pool_is_store_unavailable() {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        let store = SqliteRateStore::new(pool.clone(), "INR");
        pool.close().await;

        let err = store.lookup(&"USD".into()).await.unwrap_err();
        assert!(matches!(err, AppError::BackingStoreUnavailable(_)));
    }
}
