// Port Layer - Interfaces for external dependencies

pub mod converter;
pub mod rate_store;

// Re-exports
pub use converter::{ConversionRequest, ConversionResult, CurrencyConverter};
pub use rate_store::RateStore;
