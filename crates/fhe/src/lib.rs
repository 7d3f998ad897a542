//! Input protection primitives for the league pipeline.
//!
//! This crate provides a pluggable interface for protecting plaintext inputs
//! before they are written on-chain:
//! - **Encoder**: plaintext value ⇄ opaque payload
//! - **InputProver**: (value, context, freshness) → proof, plus the binding check
//! - **FreshnessSource**: where freshness tokens come from
//!
//! # Backends
//!
//! The shipped backends ([`CanonicalEncoder`], [`DigestProver`]) stand in for a
//! homomorphic-encryption scheme. They satisfy the round-trip and binding
//! contracts but provide **no confidentiality and no unforgeability**.
//!
//! # Examples
//!
//! ```
//! use fhe::{
//!     CanonicalEncoder, DigestProver, Encoder, FreshnessToken, InputProver, PlaintextValue,
//!     ProofContext,
//! };
//!
//! let value = PlaintextValue::Number(100);
//! let payload = CanonicalEncoder.encode(&value).unwrap();
//! assert_eq!(CanonicalEncoder.decode::<u64>(&payload).unwrap(), 100);
//!
//! let proof = DigestProver.generate_proof(&value, &ProofContext::TEAM, FreshnessToken(1_700_000_000_000));
//! assert!(DigestProver.verify_proof(&proof, &value, &ProofContext::TEAM));
//! ```

pub mod encoder;
pub mod freshness;
pub mod proof;
pub mod value;

pub use encoder::{CanonicalEncoder, Encoder, EncodingError, MAX_TEXT_BYTES, Plaintext};
pub use freshness::{FixedClock, FreshnessSource, FreshnessToken, SystemClock};
pub use proof::{DigestProver, InputProver, ProofMismatchError, ensure_valid};
pub use value::{EncodedPayload, PlaintextValue, Proof, ProofContext};
