// Rate Store Port (Interface)

use crate::domain::{CurrencyCode, RateTable};
use crate::error::Result;
use async_trait::async_trait;

/// Read-only rate lookup
///
/// Implementations must report an absent code as `Ok(None)` and reserve
/// `Err` for infrastructure failures.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// Base currency (rate 1.0)
    fn base_currency(&self) -> &CurrencyCode;

    /// Look up the rate for `code` (exact, case-sensitive)
    async fn lookup(&self, code: &CurrencyCode) -> Result<Option<f64>>;
}

/// In-memory strategy
#[async_trait]
impl RateStore for RateTable {
    fn base_currency(&self) -> &CurrencyCode {
        RateTable::base_currency(self)
    }

    async fn lookup(&self, code: &CurrencyCode) -> Result<Option<f64>> {
        Ok(RateTable::lookup(self, code))
    }
}
