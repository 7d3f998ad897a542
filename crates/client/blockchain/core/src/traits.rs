//! Contract interaction traits.
//!
//! This module defines a layered abstraction:
//! - Layer 0: BlockchainTransport (pure infrastructure)
//! - Layer 1: LeagueSubmitter, TeamReader (league domain)
//! - Layer 2: LeagueClient (composite trait)

use async_trait::async_trait;
use fhe::EncodingError;
use league_core::{PlayerAddition, TeamCreation, TradeProposal};

use crate::types::{ContractState, TeamId, TransactionData, TransactionHandle, TransactionId};

// ============================================================================
// Error Types
// ============================================================================

/// Transport layer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Request rejected by wallet: {0}")]
    Rejected(String),

    #[error("No account connected")]
    Disconnected,

    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Write submission errors.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Payload encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    #[error("No wallet account connected")]
    Disconnected,

    #[error("Wallet rejected the request: {0}")]
    Rejected(String),

    #[error("Malformed transaction: {0}")]
    Malformed(String),

    #[error("Transport error: {0}")]
    Transport(TransportError),
}

impl From<TransportError> for SubmissionError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Rejected(reason) => SubmissionError::Rejected(reason),
            TransportError::Disconnected => SubmissionError::Disconnected,
            other => SubmissionError::Transport(other),
        }
    }
}

/// Read call errors.
///
/// `Clone` so caches can keep the last failure around.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("Invalid team id: {0}")]
    InvalidTeamId(TeamId),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode contract response: {0}")]
    Decode(String),
}

// ============================================================================
// Layer 0: Pure Infrastructure
// ============================================================================

/// Pure blockchain infrastructure layer.
///
/// Low-level wallet/node operations without any league knowledge.
#[async_trait]
pub trait BlockchainTransport: Send + Sync {
    /// Account currently connected in the wallet, if any.
    async fn account(&self) -> Result<Option<Vec<u8>>, TransportError>;

    /// Hand a transaction to the wallet/node for signing and broadcast.
    ///
    /// Resolves on acceptance, not on inclusion in a block.
    async fn submit_transaction(&self, tx: TransactionData) -> Result<TransactionId, TransportError>;

    /// Execute a read-only call and return the raw return data.
    async fn call(&self, tx: TransactionData) -> Result<Vec<u8>, TransportError>;

    /// Chain identifier reported by the node.
    async fn chain_id(&self) -> Result<u64, TransportError>;

    /// Health check: verify connection to the node.
    async fn health_check(&self) -> Result<(), TransportError> {
        self.chain_id().await.map(|_| ())
    }
}

// ============================================================================
// Layer 1: League Domain Traits
// ============================================================================

/// Write operations, one per domain record.
///
/// Implementations do not deduplicate in-flight submissions and never retry.
#[async_trait]
pub trait LeagueSubmitter: Send + Sync {
    /// Submit a `createTeam` transaction.
    async fn submit_team_creation(
        &self,
        record: TeamCreation,
    ) -> Result<TransactionHandle, SubmissionError>;

    /// Submit an `addPlayer` transaction.
    async fn submit_player_addition(
        &self,
        record: PlayerAddition,
    ) -> Result<TransactionHandle, SubmissionError>;

    /// Submit a `proposeTrade` transaction.
    async fn submit_trade_proposal(
        &self,
        record: TradeProposal,
    ) -> Result<TransactionHandle, SubmissionError>;
}

/// Read-only state queries.
#[async_trait]
pub trait TeamReader: Send + Sync {
    /// Fetch the on-chain snapshot of a team.
    async fn fetch_team_info(&self, team_id: TeamId) -> Result<ContractState, ReadError>;
}

#[async_trait]
impl<T: TeamReader + ?Sized> TeamReader for std::sync::Arc<T> {
    async fn fetch_team_info(&self, team_id: TeamId) -> Result<ContractState, ReadError> {
        (**self).fetch_team_info(team_id).await
    }
}

// ============================================================================
// Layer 2: Composite Trait
// ============================================================================

/// Complete league contract client.
pub trait LeagueClient: LeagueSubmitter + TeamReader + Send + Sync {
    /// Get the blockchain name (e.g., "Ethereum").
    fn name(&self) -> &str;

    /// Get the network name (e.g., "sepolia", "mainnet", "local").
    fn network(&self) -> &str;
}
