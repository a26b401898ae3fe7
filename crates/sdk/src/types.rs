//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from api-rpc crate.

use serde::{Deserialize, Serialize};

/// Request to convert an amount
///
/// `None` currencies mean the server's base currency.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl ConvertRequest {
    pub fn new(amount: f64, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            amount,
            source_currency: Some(source.into()),
            target_currency: Some(target.into()),
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// Response from convert operation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub converted_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_not_sent() {
        let req = ConvertRequest {
            amount: 5.0,
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "amount": 5.0 }));

        let req = ConvertRequest::new(100.0, "USD", "INR").with_timeout_ms(1000);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "amount": 100.0,
                "sourceCurrency": "USD",
                "targetCurrency": "INR",
                "timeoutMs": 1000
            })
        );
    }
}
