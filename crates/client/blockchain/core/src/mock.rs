//! In-memory doubles for testing without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::traits::{BlockchainTransport, ReadError, TeamReader, TransportError};
use crate::types::{ContractState, TeamId, TransactionData, TransactionId};

/// Mock wallet/node transport.
///
/// Records every submitted transaction and read call; responses and failures
/// are scripted by the test.
#[derive(Clone)]
pub struct MockTransport {
    account: Arc<Mutex<Option<Vec<u8>>>>,
    account_error: Arc<Mutex<Option<TransportError>>>,
    chain_id: u64,
    submit_error: Arc<Mutex<Option<TransportError>>>,
    call_response: Arc<Mutex<Result<Vec<u8>, TransportError>>>,
    submitted: Arc<Mutex<Vec<TransactionData>>>,
    calls: Arc<Mutex<Vec<TransactionData>>>,
    transaction_counter: Arc<Mutex<u64>>,
}

impl MockTransport {
    /// A connected wallet on `chain_id` with account `0x11…11`.
    pub fn new(chain_id: u64) -> Self {
        Self {
            account: Arc::new(Mutex::new(Some(vec![0x11; 20]))),
            account_error: Arc::new(Mutex::new(None)),
            chain_id,
            submit_error: Arc::new(Mutex::new(None)),
            call_response: Arc::new(Mutex::new(Ok(Vec::new()))),
            submitted: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            transaction_counter: Arc::new(Mutex::new(0)),
        }
    }

    pub fn set_account(&self, account: Option<Vec<u8>>) {
        *self.account.lock().unwrap() = account;
    }

    /// Make every following account lookup fail with `error` (or succeed on `None`).
    pub fn fail_account(&self, error: Option<TransportError>) {
        *self.account_error.lock().unwrap() = error;
    }

    /// Make every following submission fail with `error` (or succeed on `None`).
    pub fn fail_submissions(&self, error: Option<TransportError>) {
        *self.submit_error.lock().unwrap() = error;
    }

    pub fn set_call_response(&self, response: Result<Vec<u8>, TransportError>) {
        *self.call_response.lock().unwrap() = response;
    }

    /// Transactions handed to the transport, in submission order.
    pub fn submitted(&self) -> Vec<TransactionData> {
        self.submitted.lock().unwrap().clone()
    }

    /// Read calls issued, in order.
    pub fn calls(&self) -> Vec<TransactionData> {
        self.calls.lock().unwrap().clone()
    }

    fn next_tx_id(&self) -> TransactionId {
        let mut counter = self.transaction_counter.lock().unwrap();
        *counter += 1;
        let mut hash = vec![0u8; 24];
        hash.extend_from_slice(&counter.to_be_bytes());
        TransactionId::from_bytes(hash)
    }
}

#[async_trait]
impl BlockchainTransport for MockTransport {
    async fn account(&self) -> Result<Option<Vec<u8>>, TransportError> {
        if let Some(err) = self.account_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.account.lock().unwrap().clone())
    }

    async fn submit_transaction(&self, tx: TransactionData) -> Result<TransactionId, TransportError> {
        if let Some(err) = self.submit_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.submitted.lock().unwrap().push(tx);
        Ok(self.next_tx_id())
    }

    async fn call(&self, tx: TransactionData) -> Result<Vec<u8>, TransportError> {
        self.calls.lock().unwrap().push(tx);
        self.call_response.lock().unwrap().clone()
    }

    async fn chain_id(&self) -> Result<u64, TransportError> {
        Ok(self.chain_id)
    }
}

/// Mock team reader backed by a map, counting every read.
#[derive(Clone, Default)]
pub struct MockTeamReader {
    teams: Arc<Mutex<HashMap<TeamId, ContractState>>>,
    failure: Arc<Mutex<Option<ReadError>>>,
    calls: Arc<AtomicUsize>,
}

impl MockTeamReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, team_id: TeamId, state: ContractState) {
        self.teams.lock().unwrap().insert(team_id, state);
    }

    /// Make every following read fail with `error` (or succeed on `None`).
    pub fn fail_with(&self, error: Option<ReadError>) {
        *self.failure.lock().unwrap() = error;
    }

    /// Number of reads performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TeamReader for MockTeamReader {
    async fn fetch_team_info(&self, team_id: TeamId) -> Result<ContractState, ReadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.teams
            .lock()
            .unwrap()
            .get(&team_id)
            .cloned()
            .ok_or_else(|| ReadError::Decode(format!("team {} does not exist", team_id)))
    }
}

/// A plausible team snapshot for tests.
pub fn sample_state(team_name: &str) -> ContractState {
    ContractState {
        team_name: team_name.to_string(),
        total_score: 100,
        wins: 3,
        losses: 1,
        ties: 0,
        is_active: true,
        owner: vec![0x11; 20],
        created_at: 1_700_000_000,
    }
}
