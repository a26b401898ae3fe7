//! Forex CLI - Command-line client for the Forex converter daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:50051";
const CONVERT_METHOD: &str = "currency.convert.v1";

#[derive(Parser)]
#[command(name = "forex")]
#[command(about = "Forex currency converter CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "FOREX_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between currencies
    Convert {
        /// Amount to convert (may be zero or negative)
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Source currency (omit for the server's base currency)
        #[arg(short, long)]
        from: Option<String>,

        /// Target currency (omit for the server's base currency)
        #[arg(short, long)]
        to: Option<String>,

        /// Per-request deadline in milliseconds
        #[arg(long, default_value = "1000")]
        timeout_ms: u64,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvertResult {
    converted_amount: f64,
}

#[derive(Tabled)]
struct ConversionRow {
    amount: f64,
    from: String,
    to: String,
    converted: f64,
}

fn convert_params(
    amount: f64,
    from: Option<&str>,
    to: Option<&str>,
    timeout_ms: u64,
) -> serde_json::Value {
    let mut params = json!({
        "amount": amount,
        "timeoutMs": timeout_ms,
    });
    if let Some(from) = from {
        params["sourceCurrency"] = json!(from);
    }
    if let Some(to) = to {
        params["targetCurrency"] = json!(to);
    }
    params
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to daemon")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            amount,
            from,
            to,
            timeout_ms,
            json,
        } => {
            let params = convert_params(amount, from.as_deref(), to.as_deref(), timeout_ms);

            let result = match call_rpc(&cli.rpc_url, CONVERT_METHOD, params).await {
                Ok(result) => result,
                Err(e) => {
                    eprintln!("{} {}", "✗ Conversion failed:".red().bold(), e);
                    return Err(e);
                }
            };

            if json {
                println!("{}", result);
                return Ok(());
            }

            let converted: ConvertResult =
                serde_json::from_value(result).context("Unexpected result shape")?;

            let base = "(base)".to_string();
            let row = ConversionRow {
                amount,
                from: from.unwrap_or_else(|| base.clone()),
                to: to.unwrap_or(base),
                converted: converted.converted_amount,
            };

            println!("{}", "✓ Converted".green().bold());
            println!();
            println!("{}", Table::new(vec![row]));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_params_omits_absent_codes() {
        let params = convert_params(100.0, Some("USD"), None, 1000);
        assert_eq!(
            params,
            json!({ "amount": 100.0, "sourceCurrency": "USD", "timeoutMs": 1000 })
        );
    }

    #[test]
    fn test_negative_amount_parses() {
        let cli = Cli::try_parse_from(["forex", "convert", "-100", "--from", "USD", "--to", "INR"])
            .unwrap();
        match cli.command {
            Commands::Convert { amount, from, .. } => {
                assert_eq!(amount, -100.0);
                assert_eq!(from.as_deref(), Some("USD"));
            }
        }
    }
}
