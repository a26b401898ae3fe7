// Forex Infrastructure - SQLite Adapter
// Implements: RateStore (per-lookup strategy), one-time table load, seeding

mod connection;
mod migration;
mod rate_repository;

pub use connection::create_pool;
pub use migration::run_migrations;
pub use rate_repository::SqliteRateStore;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
