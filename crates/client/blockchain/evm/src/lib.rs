//! EVM integration for the Stealth Squad league contract.
//!
//! This crate handles:
//! - Contract ABI bindings (`createTeam`, `addPlayer`, `proposeTrade`, `getTeamInfo`)
//! - Network configuration from the environment
//! - JSON-RPC wallet/node transport
//! - The [`ContractClient`] implementing the chain-agnostic league traits
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use client_blockchain_core::{LeagueSubmitter, TeamReader, TeamId};
//! use client_blockchain_evm::{ContractClient, EvmConfig, JsonRpcTransport};
//! use league_core::{PayloadBuilder, TeamCreation};
//!
//! let config = EvmConfig::from_env()?;
//! let transport = Arc::new(JsonRpcTransport::from_config(&config)?);
//! let client = ContractClient::new(config, transport, PayloadBuilder::default())?;
//!
//! let handle = client.submit_team_creation(TeamCreation::new("Alpha", 100)).await?;
//! let state = client.fetch_team_info(TeamId(1)).await?;
//! ```

pub mod abi;
pub mod client;
pub mod config;
pub mod rpc;

pub use client::ContractClient;
pub use config::{ConfigError, EvmConfig, EvmNetwork};
pub use rpc::JsonRpcTransport;
