//! League contract client for EVM chains.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use client_blockchain_core::{
    BlockchainConfig, BlockchainTransport, ContractState, LeagueClient, LeagueSubmitter,
    ReadError, SubmissionError, TeamId, TeamReader, TransactionData, TransactionHandle,
    TransportError, WriteState,
};
use league_core::{DomainRecord, PayloadBuilder, PlayerAddition, RecordKind, TeamCreation, TradeProposal};

use crate::abi;
use crate::config::{ConfigError, EvmConfig};

/// EVM league contract client.
///
/// Builds payloads, submits them through the transport and decodes reads.
/// Writes are never deduplicated or retried.
pub struct ContractClient {
    config: EvmConfig,
    transport: Arc<dyn BlockchainTransport>,
    builder: PayloadBuilder,
    pending: AtomicUsize,
}

impl ContractClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid.
    pub fn new(
        config: EvmConfig,
        transport: Arc<dyn BlockchainTransport>,
        builder: PayloadBuilder,
    ) -> Result<Self, ConfigError> {
        config.check()?;

        Ok(Self {
            config,
            transport,
            builder,
            pending: AtomicUsize::new(0),
        })
    }

    pub fn config(&self) -> &EvmConfig {
        &self.config
    }

    pub fn payload_builder(&self) -> &PayloadBuilder {
        &self.builder
    }

    /// Number of writes handed to the wallet and not yet accepted or rejected.
    pub fn pending_writes(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Wallet account writes are sent from, if one is connected.
    pub async fn connected_account(&self) -> Result<Option<Vec<u8>>, TransportError> {
        self.transport.account().await
    }

    async fn submit<R: DomainRecord>(&self, record: R) -> Result<TransactionHandle, SubmissionError> {
        let kind = R::KIND;
        let payload = self.builder.build(&record)?;
        drop(record);
        let mut state = WriteState::Built;

        let from = match self.transport.account().await {
            Ok(Some(from)) => from,
            Ok(None) => return Err(reject(&mut state, kind, SubmissionError::Disconnected)),
            Err(err) => return Err(reject(&mut state, kind, err.into())),
        };

        let data = abi::encode_write_call(payload)
            .map_err(|err| reject(&mut state, kind, err))?;
        tracing::debug!(
            function = kind.function_name(),
            selector = %data.get(..4).map(hex::encode).unwrap_or_default(),
            calldata_len = data.len(),
            "Contract call encoded"
        );

        let tx = TransactionData {
            from: Some(from),
            to: self.config.contract_address.to_vec(),
            data,
        };

        advance(&mut state, WriteState::Submitted, kind);
        let result = {
            let _pending = PendingGuard::new(&self.pending);
            self.transport.submit_transaction(tx).await
        };

        match result {
            Ok(transaction_id) => {
                advance(&mut state, WriteState::Accepted, kind);
                tracing::info!(
                    function = kind.function_name(),
                    tx = %transaction_id,
                    "Transaction accepted"
                );
                Ok(TransactionHandle {
                    transaction_id,
                    kind,
                    state,
                })
            }
            Err(err) => {
                advance(&mut state, WriteState::Rejected, kind);
                tracing::warn!(function = kind.function_name(), error = %err, "Transaction not accepted");
                Err(err.into())
            }
        }
    }
}

fn advance(state: &mut WriteState, next: WriteState, kind: RecordKind) {
    debug_assert!(state.can_transition_to(next), "{:?} -> {:?}", state, next);
    tracing::debug!(function = kind.function_name(), from = ?state, to = ?next, "Write state");
    *state = next;
}

/// Ends a write that never reached the wallet.
fn reject(state: &mut WriteState, kind: RecordKind, err: SubmissionError) -> SubmissionError {
    advance(state, WriteState::Rejected, kind);
    tracing::warn!(function = kind.function_name(), error = %err, "Write rejected before submission");
    err
}

/// Counts a write as pending for as long as it is alive, including when the
/// submitting future is dropped.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LeagueSubmitter for ContractClient {
    async fn submit_team_creation(
        &self,
        record: TeamCreation,
    ) -> Result<TransactionHandle, SubmissionError> {
        self.submit(record).await
    }

    async fn submit_player_addition(
        &self,
        record: PlayerAddition,
    ) -> Result<TransactionHandle, SubmissionError> {
        self.submit(record).await
    }

    async fn submit_trade_proposal(
        &self,
        record: TradeProposal,
    ) -> Result<TransactionHandle, SubmissionError> {
        self.submit(record).await
    }
}

#[async_trait]
impl TeamReader for ContractClient {
    async fn fetch_team_info(&self, team_id: TeamId) -> Result<ContractState, ReadError> {
        if team_id.0 == 0 {
            return Err(ReadError::InvalidTeamId(team_id));
        }

        let tx = TransactionData {
            from: None,
            to: self.config.contract_address.to_vec(),
            data: abi::encode_team_info_call(team_id),
        };

        tracing::debug!(%team_id, "Reading team info");
        let raw = self.transport.call(tx).await?;
        abi::decode_team_info(&raw)
    }
}

impl LeagueClient for ContractClient {
    fn name(&self) -> &str {
        "Ethereum"
    }

    fn network(&self) -> &str {
        self.config.network_name()
    }
}
