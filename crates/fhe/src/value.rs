//! Value types flowing through the protection pipeline.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A domain value before encoding (score, price, name, position, id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaintextValue {
    Number(u64),
    Text(String),
}

impl PlaintextValue {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            PlaintextValue::Number(n) => Some(*n),
            PlaintextValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PlaintextValue::Number(_) => None,
            PlaintextValue::Text(s) => Some(s),
        }
    }
}

impl From<u64> for PlaintextValue {
    fn from(value: u64) -> Self {
        PlaintextValue::Number(value)
    }
}

impl From<String> for PlaintextValue {
    fn from(value: String) -> Self {
        PlaintextValue::Text(value)
    }
}

impl From<&str> for PlaintextValue {
    fn from(value: &str) -> Self {
        PlaintextValue::Text(value.to_owned())
    }
}

/// Opaque encoded form of a [`PlaintextValue`].
///
/// Carries no type tag: the caller must know what it decodes to.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct EncodedPayload(Vec<u8>);

impl EncodedPayload {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Payload contents are not printed; they may be a reversible encoding.
impl fmt::Debug for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedPayload({} bytes)", self.0.len())
    }
}

/// Opaque proof binding a payload to its value and usage context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Proof(Vec<u8>);

impl Proof {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Names the kind of operation a proof was generated for.
///
/// Prevents a proof for one operation kind being replayed for another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProofContext(Cow<'static, str>);

impl ProofContext {
    pub const TEAM: ProofContext = ProofContext(Cow::Borrowed("team-pub-key"));
    pub const PLAYER: ProofContext = ProofContext(Cow::Borrowed("player-pub-key"));
    pub const TRADE: ProofContext = ProofContext(Cow::Borrowed("trade-pub-key"));

    pub fn new(context: impl Into<String>) -> Self {
        Self(Cow::Owned(context.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProofContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
