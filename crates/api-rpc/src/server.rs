//! JSON-RPC Server
//!
//! Serves the `Convert` operation over JSON-RPC 2.0 on TCP (HTTP and WebSocket).

use crate::error::validation_error;
use crate::handler::RpcHandler;
use crate::types::{ConvertRequest, CONVERT_METHOD};
use forex_core::port::CurrencyConverter;
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::types::ErrorObjectOwned;
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 50051;
const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    pub port: u16,
    /// Deadline applied when a request carries no `timeoutMs`
    pub default_timeout: Duration,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
            default_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Decode named params; malformed input is a validation error (4000)
fn parse_convert_params(raw: Option<&str>) -> Result<ConvertRequest, ErrorObjectOwned> {
    serde_json::from_str(raw.unwrap_or("{}"))
        .map_err(|e| validation_error(format!("Invalid params: {}", e)))
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(config: RpcServerConfig, converter: Arc<dyn CurrencyConverter>) -> Self {
        let handler = Arc::new(RpcHandler::new(converter, config.default_timeout));
        Self { config, handler }
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (useful with port 0) and the handle used
    /// to stop the server.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;

        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read local address: {}", e))?;

        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method(CONVERT_METHOD, move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req = parse_convert_params(params.as_str())?;
                    handler.convert(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!(
            addr = %local_addr,
            method = CONVERT_METHOD,
            default_timeout_ms = self.config.default_timeout.as_millis() as u64,
            "JSON-RPC server started"
        );

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}
