// Domain Layer - Pure business logic and entities

pub mod currency;
pub mod error;
pub mod rate_table;

// Re-exports
pub use currency::{CurrencyCode, DEFAULT_BASE_CURRENCY};
pub use error::DomainError;
pub use rate_table::{require_rates, two_hop, RateTable, RateTableBuilder};
