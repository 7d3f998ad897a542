//! League contract ABI bindings and payload ↔ calldata conversion.

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{SolCall, sol};
use client_blockchain_core::{ContractState, ReadError, SubmissionError, TeamId};
use league_core::{BuiltPayload, RecordKind};

sol! {
    /// Stealth Squad league contract.
    interface IStealthSquad {
        function createTeam(string teamName, bytes initialScore, bytes inputProof) external returns (uint256);

        function addPlayer(
            string name,
            string position,
            bytes performanceScore,
            bytes price,
            bytes inputProof
        ) external returns (uint256);

        function proposeTrade(uint256 playerId, uint256 toTeamId, bytes proposedPrice, bytes inputProof) external returns (uint256);

        function getTeamInfo(uint256 teamId) external view returns (
            string teamName,
            uint8 totalScore,
            uint8 wins,
            uint8 losses,
            uint8 ties,
            bool isActive,
            address owner,
            uint256 createdAt
        );
    }
}

use IStealthSquad::{addPlayerCall, createTeamCall, getTeamInfoCall, proposeTradeCall};

/// ABI-encode the contract call for a built payload: fields in declaration
/// order, then the proof.
pub fn encode_write_call(payload: BuiltPayload) -> Result<Vec<u8>, SubmissionError> {
    let proof = Bytes::from(payload.proof().as_bytes().to_vec());

    let calldata = match payload.kind() {
        RecordKind::TeamCreation => createTeamCall {
            teamName: text(&payload, "name")?,
            initialScore: encoded(&payload, "initial_score")?,
            inputProof: proof,
        }
        .abi_encode(),
        RecordKind::PlayerAddition => addPlayerCall {
            name: text(&payload, "name")?,
            position: text(&payload, "position")?,
            performanceScore: encoded(&payload, "performance_score")?,
            price: encoded(&payload, "price")?,
            inputProof: proof,
        }
        .abi_encode(),
        RecordKind::TradeProposal => proposeTradeCall {
            playerId: uint(&payload, "player_id")?,
            toTeamId: uint(&payload, "to_team_id")?,
            proposedPrice: encoded(&payload, "proposed_price")?,
            inputProof: proof,
        }
        .abi_encode(),
    };

    Ok(calldata)
}

pub fn encode_team_info_call(team_id: TeamId) -> Vec<u8> {
    getTeamInfoCall {
        teamId: U256::from(team_id.0),
    }
    .abi_encode()
}

/// Decode `getTeamInfo` return data into a [`ContractState`].
pub fn decode_team_info(data: &[u8]) -> Result<ContractState, ReadError> {
    let ret = getTeamInfoCall::abi_decode_returns(data)
        .map_err(|e| ReadError::Decode(format!("getTeamInfo: {}", e)))?;

    let created_at = u64::try_from(ret.createdAt)
        .map_err(|_| ReadError::Decode(format!("createdAt out of range: {}", ret.createdAt)))?;

    Ok(ContractState {
        team_name: ret.teamName,
        total_score: ret.totalScore,
        wins: ret.wins,
        losses: ret.losses,
        ties: ret.ties,
        is_active: ret.isActive,
        owner: ret.owner.to_vec(),
        created_at,
    })
}

fn text(payload: &BuiltPayload, label: &str) -> Result<String, SubmissionError> {
    payload
        .text(label)
        .map(str::to_owned)
        .ok_or_else(|| missing(payload.kind(), label))
}

fn encoded(payload: &BuiltPayload, label: &str) -> Result<Bytes, SubmissionError> {
    payload
        .encoded(label)
        .map(|p| Bytes::from(p.as_bytes().to_vec()))
        .ok_or_else(|| missing(payload.kind(), label))
}

fn uint(payload: &BuiltPayload, label: &str) -> Result<U256, SubmissionError> {
    payload
        .uint(label)
        .map(U256::from)
        .ok_or_else(|| missing(payload.kind(), label))
}

fn missing(kind: RecordKind, label: &str) -> SubmissionError {
    SubmissionError::Malformed(format!(
        "{} payload has no usable '{}' field",
        kind.function_name(),
        label
    ))
}
