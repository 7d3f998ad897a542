//! JSON-RPC transport against a local HTTP node: request shapes, response
//! mapping, read timeouts, and wallet rejections surfacing through the client.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolType, sol_data};
use client_blockchain_core::{
    BlockchainTransport, LeagueSubmitter, SubmissionError, TeamId, TeamReader, TransactionData,
    TransportError,
};
use client_blockchain_evm::{ContractClient, EvmConfig, JsonRpcTransport};
use fhe::FixedClock;
use league_core::{PayloadBuilder, TeamCreation};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TeamInfoAbi = (
    sol_data::String,
    sol_data::Uint<8>,
    sol_data::Uint<8>,
    sol_data::Uint<8>,
    sol_data::Uint<8>,
    sol_data::Bool,
    sol_data::Address,
    sol_data::Uint<256>,
);

const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";

fn tx_hash() -> String {
    format!("0x{}", "ab".repeat(32))
}

fn rpc_result(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": result}))
}

fn rpc_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": code, "message": message}
    }))
}

async fn mount(server: &MockServer, rpc_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"jsonrpc": "2.0", "method": rpc_method})))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn request_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| request.body_json::<Value>().unwrap())
        .collect()
}

fn client_over(server: &MockServer) -> ContractClient {
    let config = EvmConfig::default()
        .with_rpc_url(server.uri())
        .with_contract_address(Address::repeat_byte(0x42));
    let transport = JsonRpcTransport::from_config(&config).unwrap();
    let builder = PayloadBuilder::default().with_freshness(FixedClock::new(1_700_000_000_000));
    ContractClient::new(config, Arc::new(transport), builder).unwrap()
}

#[tokio::test]
async fn chain_id_parses_hex_quantity() {
    let server = MockServer::start().await;
    mount(&server, "eth_chainId", rpc_result(json!("0xaa36a7"))).await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    assert_eq!(transport.chain_id().await.unwrap(), 11_155_111);

    let bodies = request_bodies(&server).await;
    assert_eq!(bodies[0]["params"], json!([]));
}

#[tokio::test]
async fn request_ids_increase_per_call() {
    let server = MockServer::start().await;
    mount(&server, "eth_chainId", rpc_result(json!("0x1"))).await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    transport.chain_id().await.unwrap();
    transport.chain_id().await.unwrap();

    let ids: Vec<Value> = request_bodies(&server)
        .await
        .into_iter()
        .map(|body| body["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!(1), json!(2)]);
}

#[tokio::test]
async fn empty_account_list_means_disconnected() {
    let server = MockServer::start().await;
    mount(&server, "eth_accounts", rpc_result(json!([]))).await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    assert_eq!(transport.account().await.unwrap(), None);
}

#[tokio::test]
async fn first_account_is_used() {
    let server = MockServer::start().await;
    mount(
        &server,
        "eth_accounts",
        rpc_result(json!([ACCOUNT, "0x2222222222222222222222222222222222222222"])),
    )
    .await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    assert_eq!(transport.account().await.unwrap(), Some(vec![0x11; 20]));
}

#[tokio::test]
async fn send_transaction_carries_from_to_and_data() {
    let server = MockServer::start().await;
    mount(&server, "eth_sendTransaction", rpc_result(json!(tx_hash()))).await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    let id = transport
        .submit_transaction(TransactionData {
            from: Some(vec![0x11; 20]),
            to: vec![0x42; 20],
            data: vec![0xde, 0xad, 0xbe, 0xef],
        })
        .await
        .unwrap();
    assert_eq!(id.as_bytes(), &[0xab; 32][..]);

    let bodies = request_bodies(&server).await;
    assert_eq!(
        bodies[0]["params"],
        json!([{
            "from": ACCOUNT,
            "to": "0x4242424242424242424242424242424242424242",
            "data": "0xdeadbeef"
        }])
    );
}

#[tokio::test]
async fn call_targets_latest_block_without_sender() {
    let server = MockServer::start().await;
    mount(&server, "eth_call", rpc_result(json!("0x0102"))).await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    let output = transport
        .call(TransactionData {
            from: None,
            to: vec![0x42; 20],
            data: vec![0x01],
        })
        .await
        .unwrap();
    assert_eq!(output, vec![0x01, 0x02]);

    let bodies = request_bodies(&server).await;
    assert_eq!(
        bodies[0]["params"],
        json!([{"to": "0x4242424242424242424242424242424242424242", "data": "0x01"}, "latest"])
    );
}

#[tokio::test]
async fn non_json_error_status_is_a_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    assert_eq!(
        transport.chain_id().await.unwrap_err(),
        TransportError::Network("HTTP 502 Bad Gateway".into())
    );
}

#[tokio::test]
async fn rpc_error_inside_error_status_keeps_its_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32603, "message": "internal error"}
        })))
        .mount(&server)
        .await;

    let transport = JsonRpcTransport::new(server.uri()).unwrap();
    assert_eq!(
        transport.chain_id().await.unwrap_err(),
        TransportError::Rpc {
            code: -32603,
            message: "internal error".into()
        }
    );
}

#[tokio::test]
async fn slow_wallet_approval_outlives_read_timeout() {
    let server = MockServer::start().await;
    mount(
        &server,
        "eth_sendTransaction",
        rpc_result(json!(tx_hash())).set_delay(Duration::from_millis(600)),
    )
    .await;
    mount(
        &server,
        "eth_call",
        rpc_result(json!("0x")).set_delay(Duration::from_millis(600)),
    )
    .await;

    let transport =
        JsonRpcTransport::new(server.uri()).unwrap().with_read_timeout(Duration::from_millis(200));

    let id = transport
        .submit_transaction(TransactionData {
            from: Some(vec![0x11; 20]),
            to: vec![0x42; 20],
            data: vec![0x01],
        })
        .await
        .unwrap();
    assert_eq!(id.as_bytes(), &[0xab; 32][..]);

    let read = transport
        .call(TransactionData {
            from: None,
            to: vec![0x42; 20],
            data: vec![0x01],
        })
        .await;
    assert!(matches!(read, Err(TransportError::Network(_))));
}

#[tokio::test]
async fn user_rejection_surfaces_as_rejected_submission() {
    let server = MockServer::start().await;
    mount(&server, "eth_accounts", rpc_result(json!([ACCOUNT]))).await;
    mount(
        &server,
        "eth_sendTransaction",
        rpc_error(4001, "User rejected the request."),
    )
    .await;

    let client = client_over(&server);
    let err = client
        .submit_team_creation(TeamCreation::new("Alpha", 100))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmissionError::Rejected(ref reason) if reason == "User rejected the request."
    ));
    assert_eq!(client.pending_writes(), 0);
}

#[tokio::test]
async fn team_info_is_read_over_http() {
    let server = MockServer::start().await;
    let encoded = TeamInfoAbi::abi_encode_params(&(
        "Alpha".to_string(),
        100u8,
        3u8,
        1u8,
        0u8,
        true,
        Address::repeat_byte(0x11),
        U256::from(1_700_000_000u64),
    ));
    mount(
        &server,
        "eth_call",
        rpc_result(json!(format!("0x{}", hex::encode(encoded)))),
    )
    .await;

    let client = client_over(&server);
    let state = client.fetch_team_info(TeamId(1)).await.unwrap();
    assert_eq!(state.team_name, "Alpha");
    assert_eq!(state.total_score, 100);
}
