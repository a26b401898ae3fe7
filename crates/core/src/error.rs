// Central Error Type for the Application

use crate::domain::CurrencyCode;
use std::time::Duration;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// One or both currency codes are absent from the rate table.
    #[error("Conversion rate not found for {}", join_codes(.0))]
    RateNotFound(Vec<CurrencyCode>),

    /// The lookup infrastructure itself failed (connection, I/O, SQL).
    #[error("Rate store unavailable: {0}")]
    BackingStoreUnavailable(String),

    #[error("Deadline exceeded after {}ms", .0.as_millis())]
    DeadlineExceeded(Duration),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

fn join_codes(codes: &[CurrencyCode]) -> String {
    codes
        .iter()
        .map(CurrencyCode::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// Note: sqlx::Error conversion is handled in infra-sqlite crate
// by converting to AppError::BackingStoreUnavailable(String)

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_not_found_names_every_code() {
        let err = AppError::RateNotFound(vec![CurrencyCode::new("ABC"), CurrencyCode::new("XYZ")]);
        assert_eq!(err.to_string(), "Conversion rate not found for ABC, XYZ");
    }

    #[test]
    fn test_deadline_message() {
        let err = AppError::DeadlineExceeded(Duration::from_millis(250));
        assert_eq!(err.to_string(), "Deadline exceeded after 250ms");
    }
}
