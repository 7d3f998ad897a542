//! EVM network configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use client_blockchain_core::BlockchainConfig;

use crate::rpc::DEFAULT_READ_TIMEOUT;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid STEALTH_NETWORK: {0}. Must be sepolia, mainnet, or local")]
    InvalidNetwork(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid RPC URL format: {0}")]
    InvalidRpcUrl(String),

    #[error("Contract address is not configured (zero address)")]
    ZeroContractAddress,

    #[error("Chain id mismatch: configured {expected}, node reports {actual}")]
    ChainIdMismatch { expected: u64, actual: u64 },
}

/// EVM network types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvmNetwork {
    /// Ethereum Sepolia testnet
    Sepolia,
    /// Ethereum mainnet
    Mainnet,
    /// Local development node (anvil / hardhat)
    Local,
}

impl EvmNetwork {
    pub fn default_rpc_url(&self) -> &str {
        match self {
            EvmNetwork::Sepolia => "https://1rpc.io/sepolia",
            EvmNetwork::Mainnet => "https://1rpc.io/eth",
            EvmNetwork::Local => "http://127.0.0.1:8545",
        }
    }

    pub fn default_chain_id(&self) -> u64 {
        match self {
            EvmNetwork::Sepolia => 11_155_111,
            EvmNetwork::Mainnet => 1,
            EvmNetwork::Local => 31_337,
        }
    }
}

impl FromStr for EvmNetwork {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sepolia" => Ok(EvmNetwork::Sepolia),
            "mainnet" => Ok(EvmNetwork::Mainnet),
            "local" => Ok(EvmNetwork::Local),
            other => Err(ConfigError::InvalidNetwork(other.to_string())),
        }
    }
}

/// EVM-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvmConfig {
    /// Network to connect to
    pub network: EvmNetwork,

    /// Expected chain id
    pub chain_id: u64,

    /// Custom RPC endpoint URL (overrides network default)
    pub rpc_url: Option<String>,

    /// Address of the deployed league contract
    pub contract_address: Address,

    /// Deadline for node reads; wallet requests are never bounded
    pub read_timeout: Duration,
}

impl EvmConfig {
    /// Create a new configuration with the network's defaults and no contract.
    pub fn new(network: EvmNetwork) -> Self {
        Self {
            network,
            chain_id: network.default_chain_id(),
            rpc_url: None,
            contract_address: Address::ZERO,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STEALTH_NETWORK` - Network name (sepolia, mainnet, local) (default: sepolia)
    /// - `STEALTH_CHAIN_ID` - Expected chain id (default: network's chain id)
    /// - `STEALTH_RPC_URL` - Custom RPC endpoint URL
    /// - `STEALTH_CONTRACT_ADDRESS` - Deployed league contract address
    /// - `STEALTH_READ_TIMEOUT_SECS` - Deadline for node reads (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`EvmConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let network = lookup("STEALTH_NETWORK")
            .unwrap_or_else(|| "sepolia".to_string())
            .parse::<EvmNetwork>()?;

        let mut config = Self::new(network);

        if let Some(raw) = lookup("STEALTH_CHAIN_ID") {
            config.chain_id = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "STEALTH_CHAIN_ID",
                value: raw.clone(),
            })?;
        }

        config.rpc_url = lookup("STEALTH_RPC_URL").filter(|url| !url.is_empty());

        if let Some(raw) = lookup("STEALTH_CONTRACT_ADDRESS") {
            config.contract_address =
                raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "STEALTH_CONTRACT_ADDRESS",
                    value: raw.clone(),
                })?;
        }

        if let Some(raw) = lookup("STEALTH_READ_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "STEALTH_READ_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.read_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set custom RPC URL.
    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = Some(url.into());
        self
    }

    /// Set contract address.
    pub fn with_contract_address(mut self, address: Address) -> Self {
        self.contract_address = address;
        self
    }

    /// Set expected chain id.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the deadline for node reads.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Get the RPC URL (custom or default for network).
    pub fn get_rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    /// Typed variant of [`BlockchainConfig::validate`].
    pub fn check(&self) -> Result<(), ConfigError> {
        let url = self.get_rpc_url();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidRpcUrl(url.to_string()));
        }

        if self.contract_address.is_zero() {
            return Err(ConfigError::ZeroContractAddress);
        }

        if self.chain_id == 0 {
            return Err(ConfigError::InvalidValue {
                key: "STEALTH_CHAIN_ID",
                value: "0".to_string(),
            });
        }

        if self.read_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "STEALTH_READ_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

impl BlockchainConfig for EvmConfig {
    fn network_name(&self) -> &str {
        match self.network {
            EvmNetwork::Sepolia => "sepolia",
            EvmNetwork::Mainnet => "mainnet",
            EvmNetwork::Local => "local",
        }
    }

    fn rpc_url(&self) -> &str {
        self.get_rpc_url()
    }

    fn validate(&self) -> Result<(), String> {
        self.check().map_err(|e| e.to_string())
    }
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self::new(EvmNetwork::Sepolia)
    }
}
