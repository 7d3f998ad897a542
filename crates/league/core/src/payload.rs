//! Payload assembly: plaintext record → encoded fields + one proof.

use std::sync::Arc;

use fhe::{
    CanonicalEncoder, DigestProver, EncodedPayload, Encoder, EncodingError, FreshnessSource,
    InputProver, PlaintextValue, Proof, SystemClock,
};

use crate::records::{DomainRecord, RecordKind, Sensitivity};

/// One field of a built payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Protected field, encoded.
    Encoded(EncodedPayload),
    /// Public text field, in clear.
    Text(String),
    /// Public numeric field, in clear.
    Uint(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadField {
    pub label: &'static str,
    pub value: FieldValue,
}

/// Encoded fields plus exactly one proof, ready for a single submission.
///
/// Deliberately not `Clone`: a payload is consumed by one transaction.
#[derive(Debug)]
pub struct BuiltPayload {
    kind: RecordKind,
    fields: Vec<PayloadField>,
    proof: Proof,
}

impl BuiltPayload {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Fields in contract argument order.
    pub fn fields(&self) -> &[PayloadField] {
        &self.fields
    }

    pub fn proof(&self) -> &Proof {
        &self.proof
    }

    /// Encoded payload of a protected field.
    pub fn encoded(&self, label: &str) -> Option<&EncodedPayload> {
        match &self.field(label)?.value {
            FieldValue::Encoded(payload) => Some(payload),
            _ => None,
        }
    }

    /// Clear value of a public text field.
    pub fn text(&self, label: &str) -> Option<&str> {
        match &self.field(label)?.value {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Clear value of a public numeric field.
    pub fn uint(&self, label: &str) -> Option<u64> {
        match self.field(label)?.value {
            FieldValue::Uint(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_parts(self) -> (RecordKind, Vec<PayloadField>, Proof) {
        (self.kind, self.fields, self.proof)
    }

    fn field(&self, label: &str) -> Option<&PayloadField> {
        self.fields.iter().find(|f| f.label == label)
    }
}

/// Builds contract payloads from plaintext records.
///
/// Synchronous and network-free; the only outside input is the freshness
/// source.
#[derive(Clone)]
pub struct PayloadBuilder {
    encoder: Arc<dyn Encoder>,
    prover: Arc<dyn InputProver>,
    freshness: Arc<dyn FreshnessSource>,
}

impl PayloadBuilder {
    pub fn new(
        encoder: Arc<dyn Encoder>,
        prover: Arc<dyn InputProver>,
        freshness: Arc<dyn FreshnessSource>,
    ) -> Self {
        Self {
            encoder,
            prover,
            freshness,
        }
    }

    /// Replace the freshness source (e.g. a fixed clock in tests).
    pub fn with_freshness(mut self, freshness: impl FreshnessSource + 'static) -> Self {
        self.freshness = Arc::new(freshness);
        self
    }

    pub fn encoder(&self) -> &dyn Encoder {
        self.encoder.as_ref()
    }

    pub fn prover(&self) -> &dyn InputProver {
        self.prover.as_ref()
    }

    /// Encode the record's protected fields and prove its primary value.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError`] if any protected value is outside the
    /// encoder's representable domain. No proof is generated in that case.
    pub fn build<R: DomainRecord>(&self, record: &R) -> Result<BuiltPayload, EncodingError> {
        let values = record.values();
        debug_assert_eq!(values.len(), R::FIELDS.len());

        let mut fields = Vec::with_capacity(R::FIELDS.len());
        for (spec, value) in R::FIELDS.iter().zip(values) {
            let value = match (spec.sensitivity, value) {
                (Sensitivity::Protected, value) => FieldValue::Encoded(self.encoder.encode(&value)?),
                (Sensitivity::Public, PlaintextValue::Text(text)) => FieldValue::Text(text),
                (Sensitivity::Public, PlaintextValue::Number(n)) => FieldValue::Uint(n),
            };
            fields.push(PayloadField {
                label: spec.label,
                value,
            });
        }

        let context = R::KIND.context();
        let freshness = self.freshness.token();
        let proof = self
            .prover
            .generate_proof(&record.proof_value(), &context, freshness);

        tracing::debug!(
            kind = ?R::KIND,
            fields = fields.len(),
            %context,
            freshness = freshness.0,
            "Built payload"
        );

        Ok(BuiltPayload {
            kind: R::KIND,
            fields,
            proof,
        })
    }

    /// Check that a payload's proof binds to `record`'s primary value.
    pub fn verify<R: DomainRecord>(&self, payload: &BuiltPayload, record: &R) -> bool {
        payload.kind == R::KIND
            && self
                .prover
                .verify_proof(&payload.proof, &record.proof_value(), &R::KIND.context())
    }
}

impl Default for PayloadBuilder {
    /// Canonical encoding, digest proofs, wall-clock freshness.
    fn default() -> Self {
        Self::new(
            Arc::new(CanonicalEncoder),
            Arc::new(DigestProver),
            Arc::new(SystemClock),
        )
    }
}

#[cfg(test)]
mod tests {
    use fhe::{FixedClock, Plaintext, ProofContext};

    use super::*;
    use crate::records::{PlayerAddition, TeamCreation, TradeProposal};

    fn decode_number(builder: &PayloadBuilder, payload: &EncodedPayload) -> u64 {
        u64::decode_with(builder.encoder(), payload).unwrap()
    }

    fn builder() -> PayloadBuilder {
        PayloadBuilder::default().with_freshness(FixedClock::new(1_700_000_000_000))
    }

    #[test]
    fn test_team_creation_payload() {
        let builder = builder();
        let payload = builder.build(&TeamCreation::new("Alpha", 100)).unwrap();

        assert_eq!(payload.kind(), RecordKind::TeamCreation);
        let labels: Vec<_> = payload.fields().iter().map(|f| f.label).collect();
        assert_eq!(labels, ["name", "initial_score"]);

        assert_eq!(payload.text("name"), Some("Alpha"));
        let score = payload.encoded("initial_score").unwrap();
        assert_eq!(decode_number(&builder, score), 100);

        assert!(builder.prover().verify_proof(
            payload.proof(),
            &PlaintextValue::Number(100),
            &ProofContext::TEAM
        ));
    }

    #[test]
    fn test_player_addition_payload() {
        let builder = builder();
        let record = PlayerAddition::new("J. Doe", "QB", 87, 250);
        let payload = builder.build(&record).unwrap();

        assert_eq!(payload.text("name"), Some("J. Doe"));
        assert_eq!(payload.text("position"), Some("QB"));
        assert_eq!(decode_number(&builder, payload.encoded("performance_score").unwrap()), 87);
        assert_eq!(decode_number(&builder, payload.encoded("price").unwrap()), 250);

        // The proof binds the performance score, not the price.
        let prover = builder.prover();
        assert!(prover.verify_proof(payload.proof(), &PlaintextValue::Number(87), &ProofContext::PLAYER));
        assert!(!prover.verify_proof(payload.proof(), &PlaintextValue::Number(250), &ProofContext::PLAYER));
        assert!(builder.verify(&payload, &record));
    }

    #[test]
    fn test_trade_proposal_payload_order() {
        let builder = builder();
        let payload = builder.build(&TradeProposal::new(1, 2, 100)).unwrap();

        let (kind, fields, _proof) = payload.into_parts();
        assert_eq!(kind, RecordKind::TradeProposal);
        assert_eq!(fields[0].value, FieldValue::Uint(1));
        assert_eq!(fields[1].value, FieldValue::Uint(2));
        match &fields[2].value {
            FieldValue::Encoded(price) => {
                assert_eq!(builder.encoder().decode_number(price).unwrap(), 100)
            }
            other => panic!("proposed price should be encoded, got {other:?}"),
        }
    }

    #[test]
    fn test_proof_not_reusable_across_records() {
        let builder = builder();
        let team = builder.build(&TeamCreation::new("Alpha", 100)).unwrap();

        // Same protected value, different operation kind.
        let trade = TradeProposal::new(1, 2, 100);
        let trade_payload = builder.build(&trade).unwrap();
        assert!(!builder.verify(&team, &trade));
        assert!(builder.verify(&trade_payload, &trade));
        assert!(!builder.verify(&trade_payload, &TradeProposal::new(1, 2, 101)));
    }

    #[test]
    fn test_every_record_yields_exactly_one_proof() {
        let builder = builder();
        let team = builder.build(&TeamCreation::new("Alpha", 0)).unwrap();
        let player = builder.build(&PlayerAddition::new("A", "WR", 0, 0)).unwrap();
        let trade = builder.build(&TradeProposal::new(0, 0, 0)).unwrap();

        for payload in [&team, &player, &trade] {
            assert!(!payload.proof().as_bytes().is_empty());
        }
        assert_eq!(team.fields().len(), TeamCreation::FIELDS.len());
        assert_eq!(player.fields().len(), PlayerAddition::FIELDS.len());
        assert_eq!(trade.fields().len(), TradeProposal::FIELDS.len());
    }

    #[test]
    fn test_public_fields_are_not_encoded() {
        // Public text is passed through even when the encoder would reject it.
        let builder = builder();
        let payload = builder.build(&TeamCreation::new("", 5)).unwrap();
        assert_eq!(payload.text("name"), Some(""));
        assert!(payload.encoded("name").is_none());
    }

    /// Encoder that refuses every value.
    struct RejectingEncoder;

    impl Encoder for RejectingEncoder {
        fn encode(&self, _value: &PlaintextValue) -> Result<EncodedPayload, EncodingError> {
            Err(EncodingError::Unrepresentable("rejected".to_string()))
        }

        fn decode_number(&self, _payload: &EncodedPayload) -> Result<u64, EncodingError> {
            Err(EncodingError::Malformed("rejected".to_string()))
        }

        fn decode_text(&self, _payload: &EncodedPayload) -> Result<String, EncodingError> {
            Err(EncodingError::Malformed("rejected".to_string()))
        }
    }

    #[test]
    fn test_encoding_failure_propagates() {
        let builder = PayloadBuilder::new(
            Arc::new(RejectingEncoder),
            Arc::new(DigestProver),
            Arc::new(FixedClock::new(1)),
        );
        let err = builder.build(&TradeProposal::new(1, 2, 100)).unwrap_err();
        assert_eq!(err, EncodingError::Unrepresentable("rejected".to_string()));
    }
}
