//! Forex Client Implementation

use crate::error::Result;
use crate::error::SdkError;
use crate::types::{ConvertRequest, ConvertResponse};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use std::time::Duration;

const CONVERT_METHOD: &str = "currency.convert.v1";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Forex converter client
///
/// # Example
///
/// ```no_run
/// use forex_sdk::ForexClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ForexClient::connect("http://127.0.0.1:50051").await?;
/// # Ok(())
/// # }
/// ```
pub struct ForexClient {
    client: HttpClient,
}

impl ForexClient {
    /// Connect to the converter daemon
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:50051`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        Self::connect_with_timeout(url, DEFAULT_REQUEST_TIMEOUT).await
    }

    /// Connect with a custom transport timeout
    pub async fn connect_with_timeout(url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(timeout)
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// Convert an amount
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use forex_sdk::{ConvertRequest, ForexClient};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = ForexClient::connect("http://127.0.0.1:50051").await?;
    /// let response = client.convert(ConvertRequest::new(7400.0, "INR", "USD")).await?;
    /// println!("{}", response.converted_amount);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn convert(&self, request: ConvertRequest) -> Result<ConvertResponse> {
        let mut params = ObjectParams::new();
        params.insert("amount", request.amount)?;
        if let Some(source) = &request.source_currency {
            params.insert("sourceCurrency", source)?;
        }
        if let Some(target) = &request.target_currency {
            params.insert("targetCurrency", target)?;
        }
        if let Some(timeout_ms) = request.timeout_ms {
            params.insert("timeoutMs", timeout_ms)?;
        }

        let response: ConvertResponse = self.client.request(CONVERT_METHOD, params).await?;

        Ok(response)
    }
}
