// Migration Runner

use forex_core::error::{AppError, Result};
use sqlx::SqlitePool;
use tracing::info;

fn migration_error(err: sqlx::Error) -> AppError {
    AppError::BackingStoreUnavailable(format!("Migration failed: {}", err))
}

/// Embedded migrations, applied in version order
const MIGRATIONS: &[(i64, &str, &str)] = &[(
    1,
    "conversion rates",
    include_str!("../migrations/001_initial_schema.sql"),
)];

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = schema_version(pool).await?;
    info!(current_version, "Checking rate store schema");

    for &(version, name, sql) in MIGRATIONS.iter().filter(|(v, _, _)| *v > current_version) {
        info!(version, name, "Applying migration");
        apply_migration(pool, sql).await?;
    }

    Ok(())
}

/// Highest applied version, 0 on a fresh database
async fn schema_version(pool: &SqlitePool) -> Result<i64> {
    let has_table: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
    )
    .fetch_one(pool)
    .await
    .map_err(migration_error)?;

    if !has_table {
        return Ok(0);
    }

    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(migration_error)?;
    Ok(version.unwrap_or(0))
}

/// Executable statements of a migration script, `--` comment lines dropped
fn statements(sql: &str) -> impl Iterator<Item = String> + '_ {
    sql.split(';').filter_map(|chunk| {
        let stmt = chunk
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let stmt = stmt.trim();
        (!stmt.is_empty()).then(|| stmt.to_string())
    })
}

/// Apply one script atomically
async fn apply_migration(pool: &SqlitePool, sql: &str) -> Result<()> {
    let mut tx = pool.begin().await.map_err(migration_error)?;
    for stmt in statements(sql) {
        sqlx::query(&stmt)
            .execute(&mut *tx)
            .await
            .map_err(migration_error)?;
    }
    tx.commit().await.map_err(migration_error)
}
