//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use serde::{Deserialize, Serialize};

/// JSON-RPC method name of the `Convert` operation
pub const CONVERT_METHOD: &str = "currency.convert.v1";

/// currency.convert.v1 - Convert an amount between currencies
///
/// Absent, null or empty currency codes mean the base currency.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertRequest {
    pub amount: f64,
    #[serde(default)]
    pub source_currency: Option<String>,
    #[serde(default)]
    pub target_currency: Option<String>,
    /// Per-request deadline; server default when absent
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResponse {
    pub converted_amount: f64,
}
