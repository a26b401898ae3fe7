// Convert Use Case


use crate::domain::{require_rates, two_hop, CurrencyCode};
use crate::error::{AppError, Result};
use crate::port::{ConversionRequest, ConversionResult, CurrencyConverter, RateStore};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Execute the two-hop conversion against `store`
///
/// # Arguments
///
/// * `store` - Rate store (in-memory table or persisted)
/// * `req` - Conversion request; empty codes resolve to the base currency
///
/// Source and target are looked up sequentially. Both lookups always run so
/// a failure names every missing code. A result outside the finite `f64`
/// range is reported as `Internal`.
pub async fn execute(store: &dyn RateStore, req: &ConversionRequest) -> Result<ConversionResult> {
    let base = store.base_currency();
    let source = CurrencyCode::or_base(&req.source_currency, base);
    let target = CurrencyCode::or_base(&req.target_currency, base);

    let source_rate = store.lookup(&source).await?;
    let target_rate = store.lookup(&target).await?;

    let (source_rate, target_rate) =
        require_rates(source.clone(), source_rate, target.clone(), target_rate)?;

    let converted_amount = two_hop(req.amount, source_rate, target_rate);

    // JSON has no encoding for inf/NaN
    if !converted_amount.is_finite() {
        return Err(AppError::Internal(format!(
            "Converted amount is not a finite number ({} {} -> {})",
            req.amount, source, target
        )));
    }

    debug!(
        amount = req.amount,
        source = %source,
        target = %target,
        source_rate,
        target_rate,
        converted_amount,
        "Converted amount"
    );

    Ok(ConversionResult { converted_amount })
}

/// Converter service with an injected rate store
pub struct ConverterService {
    store: Arc<dyn RateStore>,
}

impl ConverterService {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    pub fn base_currency(&self) -> &CurrencyCode {
        self.store.base_currency()
    }
}

#[async_trait]
impl CurrencyConverter for ConverterService {
    async fn convert(
        &self,
        request: ConversionRequest,
        deadline: Duration,
    ) -> Result<ConversionResult> {
        // Dropping the timed-out future cancels any in-flight lookup
        match tokio::time::timeout(deadline, execute(self.store.as_ref(), &request)).await {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!(
                        source = %request.source_currency,
                        target = %request.target_currency,
                        error = %e,
                        "Conversion failed"
                    );
                }
                result
            }
            Err(_) => {
                warn!(
                    deadline_ms = deadline.as_millis() as u64,
                    source = %request.source_currency,
                    target = %request.target_currency,
                    "Conversion deadline exceeded"
                );
                Err(AppError::DeadlineExceeded(deadline))
            }
        }
    }
}
