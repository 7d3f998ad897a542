//! Common types for contract interactions.

use std::fmt;

use league_core::RecordKind;
use serde::{Deserialize, Serialize};

/// Generic transaction identifier (e.g. a 32-byte EVM transaction hash).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Vec<u8>);

impl TransactionId {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", self)
    }
}

/// On-chain team identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u64);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TeamId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Raw transaction or call request handed to the transport.
///
/// Addresses and calldata are chain-specific byte strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionData {
    /// Sending account (`None` for read calls)
    pub from: Option<Vec<u8>>,

    /// Contract address
    pub to: Vec<u8>,

    /// Encoded function call
    pub data: Vec<u8>,
}

/// Progress of a write request through this layer.
///
/// Mining is tracked by the wallet/indexing layer, so there is no
/// `Confirmed` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WriteState {
    /// Payload encoded and proven
    Built,

    /// Request handed to the wallet/node
    Submitted,

    /// Wallet/node accepted the request for broadcast
    Accepted,

    /// Wallet/node refused the request
    Rejected,
}

impl WriteState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: WriteState) -> bool {
        matches!(
            (self, next),
            (WriteState::Built, WriteState::Submitted)
                | (WriteState::Built, WriteState::Rejected)
                | (WriteState::Submitted, WriteState::Accepted)
                | (WriteState::Submitted, WriteState::Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, WriteState::Accepted | WriteState::Rejected)
    }
}

/// Handle returned once the wallet/node accepted a write request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHandle {
    /// Transaction identifier assigned by the wallet/node
    pub transaction_id: TransactionId,

    /// Which write operation was submitted
    pub kind: RecordKind,

    /// Always [`WriteState::Accepted`] for a returned handle
    pub state: WriteState,
}

/// Read-only snapshot of a team, as held by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractState {
    pub team_name: String,
    pub total_score: u8,
    pub wins: u8,
    pub losses: u8,
    pub ties: u8,
    pub is_active: bool,

    /// Owner account address (20 bytes on EVM chains)
    pub owner: Vec<u8>,

    /// Creation timestamp, seconds since the UNIX epoch
    pub created_at: u64,
}

impl ContractState {
    /// Owner address as `0x`-prefixed hex.
    pub fn owner_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.owner))
    }

    pub fn games_played(&self) -> u32 {
        u32::from(self.wins) + u32::from(self.losses) + u32::from(self.ties)
    }
}

/// Chain-specific configuration.
///
/// This is a trait to allow different chains to provide their own config types.
pub trait BlockchainConfig: Send + Sync {
    /// Human-readable network name (e.g., "sepolia", "mainnet")
    fn network_name(&self) -> &str;

    /// RPC endpoint URL
    fn rpc_url(&self) -> &str;

    /// Validate configuration
    fn validate(&self) -> Result<(), String>;
}
