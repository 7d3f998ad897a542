//! Blockchain abstraction layer for the Stealth Squad league.
//!
//! This crate provides a layered, chain-agnostic abstraction over the league
//! contract.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: LeagueClient (composite trait)
//!          ├── LeagueSubmitter   createTeam / addPlayer / proposeTrade
//!          └── TeamReader        getTeamInfo
//!
//! Layer 1: Domain Traits (league concepts)
//!
//! Layer 0: BlockchainTransport (pure infrastructure)
//! ```
//!
//! [`ReadCache`] wraps any [`TeamReader`] and memoizes its results per team.
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::{LeagueClient, ReadCache, TeamId};
//! use league_core::TeamCreation;
//!
//! async fn create_and_show(client: &dyn LeagueClient, cache: &ReadCache<impl TeamReader>) {
//!     let handle = client.submit_team_creation(TeamCreation::new("Alpha", 100)).await?;
//!     cache.invalidate(TeamId(1)).await;
//!     let state = cache.fetch(TeamId(1)).await?;
//! }
//! ```

pub mod cache;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export all traits
pub use traits::{
    BlockchainTransport, LeagueClient, LeagueSubmitter, ReadError, SubmissionError, TeamReader,
    TransportError,
};

// Re-export all types
pub use types::{
    BlockchainConfig, ContractState, TeamId, TransactionData, TransactionHandle, TransactionId,
    WriteState,
};

pub use cache::{CacheStatus, DEFAULT_CACHE_TTL, ReadCache};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockTeamReader, MockTransport};
