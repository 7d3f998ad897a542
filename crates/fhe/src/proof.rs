//! Input proof generation and verification.
//!
//! A proof binds a plaintext value to a [`ProofContext`] and a
//! [`FreshnessToken`]. Verification regenerates the proof from the candidate
//! inputs and the freshness token embedded in the proof bytes.

use sha2::{Digest, Sha256};

use crate::freshness::FreshnessToken;
use crate::value::{PlaintextValue, Proof, ProofContext};

/// Proof verification failed.
///
/// Only produced by [`ensure_valid`]; [`InputProver::verify_proof`] reports
/// mismatches as `false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("proof does not match the value under context '{context}'")]
pub struct ProofMismatchError {
    pub context: String,
}

/// Proof generation and binding check.
///
/// Implementations must satisfy:
/// - `verify_proof(&generate_proof(v, c, t), v, c)` is `true` for every `t`;
/// - verification against any other value or context is `false`;
/// - `verify_proof` never panics, whatever bytes it is given.
pub trait InputProver: Send + Sync {
    fn generate_proof(
        &self,
        value: &PlaintextValue,
        context: &ProofContext,
        freshness: FreshnessToken,
    ) -> Proof;

    fn verify_proof(&self, proof: &Proof, value: &PlaintextValue, context: &ProofContext) -> bool;
}

/// Verify a proof, turning a mismatch into an error.
pub fn ensure_valid(
    prover: &dyn InputProver,
    proof: &Proof,
    value: &PlaintextValue,
    context: &ProofContext,
) -> Result<(), ProofMismatchError> {
    if prover.verify_proof(proof, value, context) {
        Ok(())
    } else {
        Err(ProofMismatchError {
            context: context.to_string(),
        })
    }
}

const PROOF_VERSION: u8 = 1;
const DOMAIN_TAG: &[u8] = b"stealth-squad/input-proof";
const DIGEST_LEN: usize = 32;
const PROOF_LEN: usize = 1 + 8 + DIGEST_LEN;

const TAG_NUMBER: u8 = 0x00;
const TAG_TEXT: u8 = 0x01;

/// SHA-256 binding proof.
///
/// Layout: `version (1) || freshness (8, big-endian) || digest (32)`.
///
/// **Warning**: there is no secret key in the digest, so anyone can produce a
/// valid proof for any value. This proves binding and determinism only.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestProver;

impl DigestProver {
    /// Freshness token embedded in a proof produced by this prover.
    pub fn freshness_of(proof: &Proof) -> Option<FreshnessToken> {
        let bytes = proof.as_bytes();
        if bytes.len() != PROOF_LEN || bytes[0] != PROOF_VERSION {
            return None;
        }
        let mut token = [0u8; 8];
        token.copy_from_slice(&bytes[1..9]);
        Some(FreshnessToken::from_be_bytes(token))
    }

    fn digest(
        value: &PlaintextValue,
        context: &ProofContext,
        freshness: FreshnessToken,
    ) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN_TAG);
        hasher.update([PROOF_VERSION]);

        // Length prefixes keep (context, value) splits unambiguous.
        let context = context.as_str().as_bytes();
        hasher.update((context.len() as u64).to_be_bytes());
        hasher.update(context);

        match value {
            PlaintextValue::Number(n) => {
                hasher.update([TAG_NUMBER]);
                hasher.update(n.to_be_bytes());
            }
            PlaintextValue::Text(text) => {
                hasher.update([TAG_TEXT]);
                hasher.update((text.len() as u64).to_be_bytes());
                hasher.update(text.as_bytes());
            }
        }

        hasher.update(freshness.to_be_bytes());
        hasher.finalize().into()
    }
}

impl InputProver for DigestProver {
    fn generate_proof(
        &self,
        value: &PlaintextValue,
        context: &ProofContext,
        freshness: FreshnessToken,
    ) -> Proof {
        let mut bytes = Vec::with_capacity(PROOF_LEN);
        bytes.push(PROOF_VERSION);
        bytes.extend_from_slice(&freshness.to_be_bytes());
        bytes.extend_from_slice(&Self::digest(value, context, freshness));
        Proof::from_bytes(bytes)
    }

    fn verify_proof(&self, proof: &Proof, value: &PlaintextValue, context: &ProofContext) -> bool {
        let Some(freshness) = Self::freshness_of(proof) else {
            tracing::debug!(%context, len = proof.as_bytes().len(), "rejecting proof with unknown layout");
            return false;
        };

        let expected = Self::digest(value, context, freshness);
        proof.as_bytes()[1 + 8..] == expected
    }
}
