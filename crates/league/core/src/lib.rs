//! League domain records and contract payload assembly.
//!
//! ```text
//! TeamCreation / PlayerAddition / TradeProposal (plaintext)
//!        │
//!        ▼  PayloadBuilder::build
//! BuiltPayload { fields (contract order), proof }
//!        │
//!        ▼
//! contract client (one transaction)
//! ```
//!
//! Protected fields go through the [`fhe::Encoder`]; public fields are passed
//! through in clear. Each record gets exactly one proof, bound to its primary
//! protected value under the record kind's [`fhe::ProofContext`].

pub mod payload;
pub mod records;

pub use payload::{BuiltPayload, FieldValue, PayloadBuilder, PayloadField};
pub use records::{
    DomainRecord, FieldSpec, PlayerAddition, RecordKind, Sensitivity, TeamCreation, TradeProposal,
};
