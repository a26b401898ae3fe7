// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Invalid rate for {code}: {rate} (must be positive and finite)")]
    InvalidRate { code: String, rate: f64 },

    #[error("Base currency {code} must have rate 1.0, got {rate}")]
    BaseRateMismatch { code: String, rate: f64 },

    #[error("Base currency code must not be empty")]
    EmptyBaseCurrency,
}

pub type Result<T> = std::result::Result<T, DomainError>;
