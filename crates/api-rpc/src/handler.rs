//! RPC Method Handlers
//!
//! Translates wire requests into converter calls.

use crate::error::{to_rpc_error, validation_error};
use crate::types::{ConvertRequest, ConvertResponse};
use forex_core::port::{ConversionRequest, CurrencyConverter};
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    converter: Arc<dyn CurrencyConverter>,
    default_timeout: Duration,
}

impl RpcHandler {
    pub fn new(converter: Arc<dyn CurrencyConverter>, default_timeout: Duration) -> Self {
        Self {
            converter,
            default_timeout,
        }
    }

    /// currency.convert.v1
    pub async fn convert(
        &self,
        params: ConvertRequest,
    ) -> Result<ConvertResponse, ErrorObjectOwned> {
        let deadline = match params.timeout_ms {
            Some(0) => return Err(validation_error("timeoutMs must be greater than 0")),
            Some(ms) => Duration::from_millis(ms),
            None => self.default_timeout,
        };

        let req = ConversionRequest::new(
            params.amount,
            params.source_currency.unwrap_or_default(),
            params.target_currency.unwrap_or_default(),
        );

        debug!(
            amount = req.amount,
            source = %req.source_currency,
            target = %req.target_currency,
            deadline_ms = deadline.as_millis() as u64,
            "Convert request"
        );

        let result = self
            .converter
            .convert(req, deadline)
            .await
            .map_err(to_rpc_error)?;

        Ok(ConvertResponse {
            converted_amount: result.converted_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code;
    use async_trait::async_trait;
    use forex_core::application::ConverterService;
    use forex_core::domain::RateTable;
    use forex_core::error::{AppError, Result};
    use forex_core::port::ConversionResult;
    use std::sync::Mutex;

    fn handler() -> RpcHandler {
        let service = ConverterService::new(Arc::new(RateTable::reference()));
        RpcHandler::new(Arc::new(service), Duration::from_secs(1))
    }

    fn request(amount: f64, source: Option<&str>, target: Option<&str>) -> ConvertRequest {
        ConvertRequest {
            amount,
            source_currency: source.map(String::from),
            target_currency: target.map(String::from),
            timeout_ms: None,
        }
    }

    /// Records the deadline it was called with
    struct RecordingConverter {
        seen: Mutex<Option<Duration>>,
    }

    #[async_trait]
    impl CurrencyConverter for RecordingConverter {
        async fn convert(
            &self,
            request: ConversionRequest,
            deadline: Duration,
        ) -> Result<ConversionResult> {
            *self.seen.lock().unwrap() = Some(deadline);
            Ok(ConversionResult {
                converted_amount: request.amount,
            })
        }
    }

    #[tokio::test]
    async fn test_convert_usd_to_inr() {
        let res = handler()
            .convert(request(100.0, Some("USD"), Some("INR")))
            .await
            .unwrap();
        assert_eq!(res.converted_amount, 8408.0);
    }

    #[tokio::test]
    async fn test_absent_target_is_base() {
        let h = handler();
        let implicit = h.convert(request(100.0, Some("USD"), None)).await.unwrap();
        let explicit = h
            .convert(request(100.0, Some("USD"), Some("INR")))
            .await
            .unwrap();
        assert_eq!(implicit.converted_amount, explicit.converted_amount);
    }

    #[tokio::test]
    async fn test_unknown_code_maps_to_rate_not_found() {
        let err = handler()
            .convert(request(100.0, Some("INVALID"), Some("INR")))
            .await
            .unwrap_err();
        assert_eq!(err.code(), code::RATE_NOT_FOUND);
        assert!(err.message().contains("INVALID"));
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected() {
        let mut req = request(1.0, None, None);
        req.timeout_ms = Some(0);
        let err = handler().convert(req).await.unwrap_err();
        assert_eq!(err.code(), code::VALIDATION_ERROR);
    }

    #[tokio::test]
    async fn test_deadline_selection() {
        let converter = Arc::new(RecordingConverter {
            seen: Mutex::new(None),
        });
        let h = RpcHandler::new(converter.clone(), Duration::from_millis(1000));

        h.convert(request(1.0, None, None)).await.unwrap();
        assert_eq!(*converter.seen.lock().unwrap(), Some(Duration::from_millis(1000)));

        let mut req = request(1.0, None, None);
        req.timeout_ms = Some(75);
        h.convert(req).await.unwrap();
        assert_eq!(*converter.seen.lock().unwrap(), Some(Duration::from_millis(75)));
    }

    #[tokio::test]
    async fn test_converter_error_propagates() {
        struct Failing;

        #[async_trait]
        impl CurrencyConverter for Failing {
            async fn convert(&self, _: ConversionRequest, _: Duration) -> Result<ConversionResult> {
                Err(AppError::BackingStoreUnavailable("connection refused".into()))
            }
        }

        let h = RpcHandler::new(Arc::new(Failing), Duration::from_secs(1));
        let err = h.convert(request(1.0, None, None)).await.unwrap_err();
        assert_eq!(err.code(), code::STORE_UNAVAILABLE);
    }
}
