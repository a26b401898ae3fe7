//! Rate store wiring for the configured backend

use crate::config::{DaemonConfig, RateBackend};
use anyhow::{bail, Context, Result};
use forex_core::domain::RateTable;
use forex_core::port::RateStore;
use forex_infra_sqlite::{create_pool, run_migrations, SqliteRateStore};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the rate store selected by `config.backend`
pub async fn build_rate_store(config: &DaemonConfig) -> Result<Arc<dyn RateStore>> {
    match config.backend {
        RateBackend::Static => {
            let table = RateTable::reference();
            if table.base_currency().as_str() != config.base_currency {
                bail!(
                    "static rate table has base {}, but FOREX_BASE_CURRENCY is {}",
                    table.base_currency(),
                    config.base_currency
                );
            }
            info!(rates = table.len(), base = %table.base_currency(), "Using static rate table");
            Ok(Arc::new(table))
        }
        RateBackend::Sqlite => {
            let store = open_sqlite(config).await?;
            info!(db_path = %config.db_path, "Using SQLite rate store (per-lookup)");
            Ok(Arc::new(store))
        }
        RateBackend::SqliteCached => {
            let store = open_sqlite(config).await?;
            let table = store
                .load_table()
                .await
                .context("Failed to load rate table from SQLite")?;
            info!(db_path = %config.db_path, "Using SQLite rate table (cached at startup)");
            Ok(Arc::new(table))
        }
    }
}

async fn open_sqlite(config: &DaemonConfig) -> Result<SqliteRateStore> {
    if !config.db_path.contains(":memory:") {
        if let Some(parent) = Path::new(&config.db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
    }

    info!(db_path = %config.db_path, "Initializing database...");

    let pool = create_pool(&config.db_path)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    let store = SqliteRateStore::new(pool, config.base_currency.clone());

    if config.seed_defaults && store.count().await? == 0 {
        let table = RateTable::reference();
        if table.base_currency().as_str() == config.base_currency {
            store.seed(&table).await?;
        } else {
            warn!(
                base = %config.base_currency,
                "Rate store is empty and reference rates use a different base; not seeding"
            );
        }
    }

    store
        .verify_base()
        .await
        .context("Rate store failed base currency check")?;

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DaemonConfig;
    use forex_core::domain::CurrencyCode;

    fn config(backend: &str, seed: bool) -> DaemonConfig {
        let backend = backend.to_string();
        DaemonConfig::from_lookup(move |key| match key {
            "FOREX_RATE_BACKEND" => Some(backend.clone()),
            "FOREX_DB_PATH" => Some("sqlite::memory:".to_string()),
            "FOREX_SEED_DEFAULTS" => Some(seed.to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_every_backend_serves_reference_rates() {
        for backend in ["static", "sqlite", "sqlite-cached"] {
            let store = build_rate_store(&config(backend, true)).await.unwrap();
            assert_eq!(store.base_currency().as_str(), "INR");
            assert_eq!(
                store.lookup(&CurrencyCode::new("USD")).await.unwrap(),
                Some(84.08),
                "backend {}",
                backend
            );
        }
    }

    #[tokio::test]
    async fn test_empty_store_without_seed_fails_base_check() {
        assert!(build_rate_store(&config("sqlite", false)).await.is_err());
    }

    #[tokio::test]
    async fn test_static_backend_rejects_other_base() {
        let mut cfg = config("static", true);
        cfg.base_currency = "USD".to_string();
        assert!(build_rate_store(&cfg).await.is_err());
    }
}
