// Currency Converter Port (Interface)

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Conversion request
///
/// Empty currency codes mean the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    #[serde(default)]
    pub source_currency: String,
    #[serde(default)]
    pub target_currency: String,
}

impl ConversionRequest {
    pub fn new(amount: f64, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            amount,
            source_currency: source.into(),
            target_currency: target.into(),
        }
    }
}

/// Successful conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub converted_amount: f64,
}

/// The `Convert` operation exposed by the service
#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    /// Convert `request.amount`, failing with `DeadlineExceeded` if the
    /// lookups and arithmetic do not finish within `deadline`.
    async fn convert(
        &self,
        request: ConversionRequest,
        deadline: Duration,
    ) -> Result<ConversionResult>;
}
