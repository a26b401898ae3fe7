//! Daemon configuration, read once from the environment at startup

use anyhow::{anyhow, bail, Context, Result};
use forex_core::domain::DEFAULT_BASE_CURRENCY;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_RPC_HOST: &str = "127.0.0.1";
const DEFAULT_RPC_PORT: u16 = 50051;
const DEFAULT_DB_PATH: &str = "~/.forex/rates.db";
const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Where rates come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateBackend {
    /// Hard-coded reference table
    Static,
    /// SQLite queried on every lookup
    Sqlite,
    /// SQLite loaded once into memory at startup
    SqliteCached,
}

impl FromStr for RateBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "static" => Ok(RateBackend::Static),
            "sqlite" => Ok(RateBackend::Sqlite),
            "sqlite-cached" => Ok(RateBackend::SqliteCached),
            other => Err(anyhow!(
                "unknown rate backend '{}' (expected static, sqlite or sqlite-cached)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub rpc_host: String,
    pub rpc_port: u16,
    pub backend: RateBackend,
    pub db_path: String,
    pub base_currency: String,
    pub default_timeout: Duration,
    pub seed_defaults: bool,
    pub log_format: LogFormat,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset keys take defaults)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_host = lookup("FOREX_RPC_HOST").unwrap_or_else(|| DEFAULT_RPC_HOST.to_string());

        let rpc_port = match lookup("FOREX_RPC_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("FOREX_RPC_PORT is not a port: {}", v))?,
            None => DEFAULT_RPC_PORT,
        };

        let backend = match lookup("FOREX_RATE_BACKEND") {
            Some(v) => v.parse().context("FOREX_RATE_BACKEND")?,
            None => RateBackend::Static,
        };

        let db_path = lookup("FOREX_DB_PATH")
            .unwrap_or_else(|| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

        let base_currency =
            lookup("FOREX_BASE_CURRENCY").unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string());
        if base_currency.is_empty() {
            bail!("FOREX_BASE_CURRENCY must not be empty");
        }

        let timeout_ms = match lookup("FOREX_DEFAULT_TIMEOUT_MS") {
            Some(v) => v
                .parse::<u64>()
                .with_context(|| format!("FOREX_DEFAULT_TIMEOUT_MS is not a number: {}", v))?,
            None => DEFAULT_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            bail!("FOREX_DEFAULT_TIMEOUT_MS must be greater than 0");
        }

        let seed_defaults = match lookup("FOREX_SEED_DEFAULTS").as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => bail!("FOREX_SEED_DEFAULTS must be true or false, got {}", other),
        };

        let log_format = match lookup("FOREX_LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => bail!("FOREX_LOG_FORMAT must be pretty or json, got {}", other),
        };

        Ok(Self {
            rpc_host,
            rpc_port,
            backend,
            db_path,
            base_currency,
            default_timeout: Duration::from_millis(timeout_ms),
            seed_defaults,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<DaemonConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DaemonConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.rpc_host, "127.0.0.1");
        assert_eq!(cfg.rpc_port, 50051);
        assert_eq!(cfg.backend, RateBackend::Static);
        assert_eq!(cfg.base_currency, "INR");
        assert_eq!(cfg.default_timeout, Duration::from_millis(1000));
        assert!(cfg.seed_defaults);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(cfg.db_path.ends_with(".forex/rates.db"));
    }

    #[test]
    fn test_overrides() {
        let cfg = config(&[
            ("FOREX_RPC_PORT", "9000"),
            ("FOREX_RATE_BACKEND", "sqlite-cached"),
            ("FOREX_DB_PATH", "/tmp/rates.db"),
            ("FOREX_DEFAULT_TIMEOUT_MS", "250"),
            ("FOREX_SEED_DEFAULTS", "false"),
            ("FOREX_LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(cfg.rpc_port, 9000);
        assert_eq!(cfg.backend, RateBackend::SqliteCached);
        assert_eq!(cfg.db_path, "/tmp/rates.db");
        assert_eq!(cfg.default_timeout, Duration::from_millis(250));
        assert!(!cfg.seed_defaults);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config(&[("FOREX_RPC_PORT", "70000")]).is_err());
        assert!(config(&[("FOREX_RATE_BACKEND", "postgres")]).is_err());
        assert!(config(&[("FOREX_DEFAULT_TIMEOUT_MS", "0")]).is_err());
        assert!(config(&[("FOREX_SEED_DEFAULTS", "maybe")]).is_err());
        assert!(config(&[("FOREX_BASE_CURRENCY", "")]).is_err());
    }
}
