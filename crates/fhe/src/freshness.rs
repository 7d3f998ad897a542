//! Freshness tokens embedded in proofs.

use serde::{Deserialize, Serialize};

/// Token that makes two proofs for the same (value, context) distinguishable.
///
/// Milliseconds since the UNIX epoch for [`SystemClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FreshnessToken(pub u64);

impl FreshnessToken {
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }
}

impl From<u64> for FreshnessToken {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Source of freshness tokens for proof generation.
pub trait FreshnessSource: Send + Sync {
    fn token(&self) -> FreshnessToken;
}

/// Wall-clock freshness source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl FreshnessSource for SystemClock {
    fn token(&self) -> FreshnessToken {
        // Clocks before the epoch collapse to 0.
        let millis = chrono::Utc::now().timestamp_millis();
        FreshnessToken(u64::try_from(millis).unwrap_or(0))
    }
}

/// Fixed freshness source for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub FreshnessToken);

impl FixedClock {
    pub fn new(millis: u64) -> Self {
        Self(FreshnessToken(millis))
    }
}

impl FreshnessSource for FixedClock {
    fn token(&self) -> FreshnessToken {
        self.0
    }
}
