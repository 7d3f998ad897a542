//! Application configuration structures and loaders.
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use client_blockchain_core::DEFAULT_CACHE_TTL;
use client_blockchain_evm::{ConfigError, EvmConfig};

/// Configuration required to bootstrap the league client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub evm: EvmConfig,
    pub wallet_connect_project_id: Option<String>,
    pub cache_ttl: Duration,
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            evm: EvmConfig::default(),
            wallet_connect_project_id: None,
            cache_ttl: DEFAULT_CACHE_TTL,
            log_filter: None,
        }
    }
}

impl AppConfig {
    pub fn new(evm: EvmConfig) -> Self {
        Self {
            evm,
            ..Self::default()
        }
    }

    /// Load `.env` (if present), then read the process environment.
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Ok(Self::from_env()?)
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `STEALTH_NETWORK`, `STEALTH_CHAIN_ID`, `STEALTH_RPC_URL`,
    ///   `STEALTH_CONTRACT_ADDRESS`, `STEALTH_READ_TIMEOUT_SECS` - see
    ///   [`EvmConfig::from_env`]
    /// - `WALLET_CONNECT_PROJECT_ID` - Wallet connector project id (optional)
    /// - `STEALTH_CACHE_TTL_SECS` - Read cache freshness window (default: 30)
    /// - `RUST_LOG` - Log filter (default: info)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read a dotenv-formatted file without touching the process
    /// environment. Variables already set in the process take precedence.
    pub fn from_dotenv_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut vars = HashMap::new();
        for item in dotenvy::from_path_iter(path.as_ref())? {
            let (key, value) = item?;
            vars.insert(key, value);
        }

        Ok(Self::from_lookup(|key| {
            env::var(key).ok().or_else(|| vars.get(key).cloned())
        })?)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::new(EvmConfig::from_lookup(&lookup)?);

        config.wallet_connect_project_id =
            lookup("WALLET_CONNECT_PROJECT_ID").filter(|id| !id.is_empty());

        if let Some(raw) = lookup("STEALTH_CACHE_TTL_SECS") {
            let secs = read_value::<u64>(&raw).ok_or(ConfigError::InvalidValue {
                key: "STEALTH_CACHE_TTL_SECS",
                value: raw.clone(),
            })?;
            config.cache_ttl = Duration::from_secs(secs);
        }

        config.log_filter = lookup("RUST_LOG").filter(|f| !f.is_empty());

        Ok(config)
    }
}

fn read_value<T>(raw: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    raw.trim().parse().ok()
}
