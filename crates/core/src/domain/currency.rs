// Currency Domain Model

use serde::{Deserialize, Serialize};

/// Base currency of the reference rate table
pub const DEFAULT_BASE_CURRENCY: &str = "INR";

/// Currency code (e.g. "USD")
///
/// No format validation: membership in the rate table is the only check.
/// Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Resolve a possibly-empty code, substituting `base` when empty.
    pub fn or_base(code: &str, base: &CurrencyCode) -> Self {
        if code.is_empty() {
            base.clone()
        } else {
            Self::new(code)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
