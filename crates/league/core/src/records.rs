//! Plaintext domain records, one per user-initiated write.
//!
//! Every record declares its fields in contract argument order, which of them
//! are protected, and the value its proof binds to.

use fhe::{PlaintextValue, ProofContext};
use serde::{Deserialize, Serialize};

/// The three write operations of the league contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    TeamCreation,
    PlayerAddition,
    TradeProposal,
}

impl RecordKind {
    /// Proof context reserved for this kind of record.
    pub fn context(self) -> ProofContext {
        match self {
            RecordKind::TeamCreation => ProofContext::TEAM,
            RecordKind::PlayerAddition => ProofContext::PLAYER,
            RecordKind::TradeProposal => ProofContext::TRADE,
        }
    }

    /// Contract function the record is submitted through.
    pub fn function_name(self) -> &'static str {
        match self {
            RecordKind::TeamCreation => "createTeam",
            RecordKind::PlayerAddition => "addPlayer",
            RecordKind::TradeProposal => "proposeTrade",
        }
    }
}

/// Whether a field is encoded before leaving the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensitivity {
    /// Encoded and submitted as an opaque payload.
    Protected,
    /// Submitted in clear.
    Public,
}

/// Declaration of one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpec {
    pub label: &'static str,
    pub sensitivity: Sensitivity,
}

impl FieldSpec {
    pub const fn protected(label: &'static str) -> Self {
        Self {
            label,
            sensitivity: Sensitivity::Protected,
        }
    }

    pub const fn public(label: &'static str) -> Self {
        Self {
            label,
            sensitivity: Sensitivity::Public,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.sensitivity == Sensitivity::Protected
    }
}

/// A plaintext record that can be turned into a contract payload.
pub trait DomainRecord {
    const KIND: RecordKind;

    /// Field declarations, in contract argument order.
    const FIELDS: &'static [FieldSpec];

    /// Label of the protected field the proof binds to.
    const PROOF_FIELD: &'static str;

    /// Field values in the same order as [`Self::FIELDS`].
    fn values(&self) -> Vec<PlaintextValue>;

    /// The value the proof binds to.
    fn proof_value(&self) -> PlaintextValue;
}

/// Create a new team with an initial score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCreation {
    pub name: String,
    pub initial_score: u64,
}

impl TeamCreation {
    pub fn new(name: impl Into<String>, initial_score: u64) -> Self {
        Self {
            name: name.into(),
            initial_score,
        }
    }
}

impl DomainRecord for TeamCreation {
    const KIND: RecordKind = RecordKind::TeamCreation;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::public("name"),
        FieldSpec::protected("initial_score"),
    ];
    const PROOF_FIELD: &'static str = "initial_score";

    fn values(&self) -> Vec<PlaintextValue> {
        vec![
            PlaintextValue::Text(self.name.clone()),
            PlaintextValue::Number(self.initial_score),
        ]
    }

    fn proof_value(&self) -> PlaintextValue {
        PlaintextValue::Number(self.initial_score)
    }
}

/// Add a player to the caller's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAddition {
    pub name: String,
    pub position: String,
    pub performance_score: u64,
    pub price: u64,
}

impl PlayerAddition {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        performance_score: u64,
        price: u64,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            performance_score,
            price,
        }
    }
}

impl DomainRecord for PlayerAddition {
    const KIND: RecordKind = RecordKind::PlayerAddition;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::public("name"),
        FieldSpec::public("position"),
        FieldSpec::protected("performance_score"),
        FieldSpec::protected("price"),
    ];
    const PROOF_FIELD: &'static str = "performance_score";

    fn values(&self) -> Vec<PlaintextValue> {
        vec![
            PlaintextValue::Text(self.name.clone()),
            PlaintextValue::Text(self.position.clone()),
            PlaintextValue::Number(self.performance_score),
            PlaintextValue::Number(self.price),
        ]
    }

    fn proof_value(&self) -> PlaintextValue {
        PlaintextValue::Number(self.performance_score)
    }
}

/// Offer a price for moving a player to another team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeProposal {
    pub player_id: u64,
    pub to_team_id: u64,
    pub proposed_price: u64,
}

impl TradeProposal {
    pub fn new(player_id: u64, to_team_id: u64, proposed_price: u64) -> Self {
        Self {
            player_id,
            to_team_id,
            proposed_price,
        }
    }
}

impl DomainRecord for TradeProposal {
    const KIND: RecordKind = RecordKind::TradeProposal;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::public("player_id"),
        FieldSpec::public("to_team_id"),
        FieldSpec::protected("proposed_price"),
    ];
    const PROOF_FIELD: &'static str = "proposed_price";

    fn values(&self) -> Vec<PlaintextValue> {
        vec![
            PlaintextValue::Number(self.player_id),
            PlaintextValue::Number(self.to_team_id),
            PlaintextValue::Number(self.proposed_price),
        ]
    }

    fn proof_value(&self) -> PlaintextValue {
        PlaintextValue::Number(self.proposed_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_declarations<R: DomainRecord>(record: &R) {
        assert_eq!(record.values().len(), R::FIELDS.len());

        let proof_field = R::FIELDS
            .iter()
            .position(|f| f.label == R::PROOF_FIELD)
            .expect("proof field must be declared");
        assert!(R::FIELDS[proof_field].is_protected());
        assert_eq!(record.values()[proof_field], record.proof_value());
    }

    #[test]
    fn test_declarations_are_consistent() {
        check_declarations(&TeamCreation::new("Alpha", 100));
        check_declarations(&PlayerAddition::new("J. Doe", "QB", 87, 250));
        check_declarations(&TradeProposal::new(1, 2, 100));
    }

    #[test]
    fn test_kind_contexts_are_distinct() {
        assert_eq!(RecordKind::TeamCreation.context().as_str(), "team-pub-key");
        assert_eq!(RecordKind::PlayerAddition.context().as_str(), "player-pub-key");
        assert_eq!(RecordKind::TradeProposal.context().as_str(), "trade-pub-key");
    }

    #[test]
    fn test_function_names() {
        assert_eq!(TeamCreation::KIND.function_name(), "createTeam");
        assert_eq!(PlayerAddition::KIND.function_name(), "addPlayer");
        assert_eq!(TradeProposal::KIND.function_name(), "proposeTrade");
    }

    #[test]
    fn test_records_deserialize_from_ui_json() {
        let record: PlayerAddition = serde_json::from_str(
            r#"{"name":"J. Doe","position":"QB","performance_score":87,"price":250}"#,
        )
        .unwrap();
        assert_eq!(record, PlayerAddition::new("J. Doe", "QB", 87, 250));
    }
}
