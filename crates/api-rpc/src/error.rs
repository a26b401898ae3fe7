//! RPC Error Types
//!
//! Maps application errors to JSON-RPC error codes.

use forex_core::error::AppError;
use jsonrpsee::types::ErrorObjectOwned;
use serde_json::json;

/// RPC Error Codes
pub mod code {
    pub const VALIDATION_ERROR: i32 = 4000;
    pub const RATE_NOT_FOUND: i32 = 4001;
    pub const DEADLINE_EXCEEDED: i32 = 4008;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const STORE_UNAVAILABLE: i32 = 5001;
}

/// Convert AppError to JSON-RPC ErrorObject
pub fn to_rpc_error(err: AppError) -> ErrorObjectOwned {
    let msg = err.to_string();
    match err {
        AppError::RateNotFound(codes) => {
            let missing: Vec<&str> = codes.iter().map(|c| c.as_str()).collect();
            ErrorObjectOwned::owned(
                code::RATE_NOT_FOUND,
                msg,
                Some(json!({ "missing": missing })),
            )
        }
        AppError::DeadlineExceeded(deadline) => ErrorObjectOwned::owned(
            code::DEADLINE_EXCEEDED,
            msg,
            Some(json!({ "timeoutMs": deadline.as_millis() as u64 })),
        ),
        AppError::BackingStoreUnavailable(_) => {
            ErrorObjectOwned::owned(code::STORE_UNAVAILABLE, msg, None::<()>)
        }
        AppError::Domain(_) | AppError::Config(_) | AppError::Internal(_) => {
            ErrorObjectOwned::owned(code::INTERNAL_ERROR, msg, None::<()>)
        }
    }
}

/// Request rejected before reaching the converter
pub fn validation_error(msg: impl Into<String>) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(code::VALIDATION_ERROR, msg.into(), None::<()>)
}

#[cfg(test)]
mod tests {
    use super::*;
    use forex_core::domain::CurrencyCode;
    use std::time::Duration;

    #[test]
    fn test_rate_not_found_lists_codes() {
        let err = to_rpc_error(AppError::RateNotFound(vec![
            CurrencyCode::new("ABC"),
            CurrencyCode::new("XYZ"),
        ]));
        assert_eq!(err.code(), code::RATE_NOT_FOUND);
        assert_eq!(err.message(), "Conversion rate not found for ABC, XYZ");

        let data: serde_json::Value = serde_json::from_str(err.data().unwrap().get()).unwrap();
        assert_eq!(data, json!({ "missing": ["ABC", "XYZ"] }));
    }

    #[test]
    fn test_store_failure_has_its_own_code() {
        let err = to_rpc_error(AppError::BackingStoreUnavailable("Pool closed".into()));
        assert_eq!(err.code(), code::STORE_UNAVAILABLE);
        assert_ne!(err.code(), code::RATE_NOT_FOUND);
    }

    #[test]
    fn test_internal_code() {
        let err = to_rpc_error(AppError::Internal("Converted amount is not a finite number".into()));
        assert_eq!(err.code(), code::INTERNAL_ERROR);
        assert!(err.data().is_none());
    }

    #[test]
    fn test_deadline_code() {
        let err = to_rpc_error(AppError::DeadlineExceeded(Duration::from_millis(10)));
        assert_eq!(err.code(), code::DEADLINE_EXCEEDED);
    }
}
