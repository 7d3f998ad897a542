//! JSON-RPC transport over HTTP.
//!
//! Talks to a wallet-enabled node endpoint (`eth_accounts`,
//! `eth_sendTransaction`) or a plain node for reads (`eth_call`,
//! `eth_chainId`).
//!
//! Wallet requests have no deadline: `eth_sendTransaction` resolves only once
//! the user approves or rejects it. Reads are bounded by the read timeout.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use client_blockchain_core::{BlockchainTransport, TransactionData, TransactionId, TransportError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::EvmConfig;

/// EIP-1193 "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Default deadline for `eth_call` and `eth_chainId`.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// [`BlockchainTransport`] backed by an HTTP JSON-RPC endpoint.
pub struct JsonRpcTransport {
    url: String,
    http: reqwest::Client,
    read_timeout: Duration,
    next_id: AtomicU64,
}

impl JsonRpcTransport {
    pub fn new(url: impl Into<String>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            http,
            read_timeout: DEFAULT_READ_TIMEOUT,
            next_id: AtomicU64::new(1),
        })
    }

    /// Set the deadline for read requests. Wallet requests stay unbounded.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn from_config(config: &EvmConfig) -> Result<Self, TransportError> {
        Ok(Self::new(config.get_rpc_url())?.with_read_timeout(config.read_timeout))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        timeout: Option<Duration>,
    ) -> Result<T, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        tracing::debug!(method, id, "JSON-RPC request");

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        match parse_response(&text) {
            Err(TransportError::InvalidResponse(_)) if !status.is_success() => {
                Err(TransportError::Network(format!("HTTP {}", status)))
            }
            other => other,
        }
    }
}

#[async_trait]
impl BlockchainTransport for JsonRpcTransport {
    async fn account(&self) -> Result<Option<Vec<u8>>, TransportError> {
        let accounts: Vec<String> = self.request("eth_accounts", json!([]), None).await?;
        accounts.first().map(|a| decode_hex(a)).transpose()
    }

    async fn submit_transaction(&self, tx: TransactionData) -> Result<TransactionId, TransportError> {
        let mut object = json!({
            "to": encode_hex(&tx.to),
            "data": encode_hex(&tx.data),
        });
        if let Some(from) = &tx.from {
            object["from"] = Value::String(encode_hex(from));
        }

        let hash: String = self
            .request("eth_sendTransaction", json!([object]), None)
            .await?;
        decode_hex(&hash).map(TransactionId::from_bytes)
    }

    async fn call(&self, tx: TransactionData) -> Result<Vec<u8>, TransportError> {
        let object = json!({
            "to": encode_hex(&tx.to),
            "data": encode_hex(&tx.data),
        });

        let result: String = self
            .request("eth_call", json!([object, "latest"]), Some(self.read_timeout))
            .await?;
        decode_hex(&result)
    }

    async fn chain_id(&self) -> Result<u64, TransportError> {
        let quantity: String = self
            .request("eth_chainId", json!([]), Some(self.read_timeout))
            .await?;
        parse_quantity(&quantity)
    }
}

fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, TransportError> {
    let response: RpcResponse<T> =
        serde_json::from_str(body).map_err(|e| TransportError::InvalidResponse(e.to_string()))?;

    if let Some(error) = response.error {
        return Err(map_rpc_error(error));
    }

    response
        .result
        .ok_or_else(|| TransportError::InvalidResponse("response has no result".to_string()))
}

fn map_rpc_error(error: RpcErrorObject) -> TransportError {
    match error.code {
        USER_REJECTED_CODE => TransportError::Rejected(error.message),
        code => TransportError::Rpc {
            code,
            message: error.message,
        },
    }
}

fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn decode_hex(s: &str) -> Result<Vec<u8>, TransportError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| TransportError::InvalidResponse(format!("{}: {}", s, e)))
}

fn parse_quantity(s: &str) -> Result<u64, TransportError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| TransportError::InvalidResponse(format!("not a hex quantity: {}", s)))?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| TransportError::InvalidResponse(format!("{}: {}", s, e)))
}
