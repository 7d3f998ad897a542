//! Plaintext ⇄ payload encoding.

use crate::value::{EncodedPayload, PlaintextValue};

/// Longest text value (in UTF-8 bytes) the canonical encoder accepts.
pub const MAX_TEXT_BYTES: usize = 256;

/// Errors raised while encoding or decoding a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("value outside the representable domain: {0}")]
    Unrepresentable(String),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// Reversible value ⇄ payload encoding.
///
/// Implementations must be injective within a value type and round-trip
/// exactly: `decode(encode(v)) == v` for every representable `v`.
pub trait Encoder: Send + Sync {
    /// Encode a plaintext value into an opaque payload.
    fn encode(&self, value: &PlaintextValue) -> Result<EncodedPayload, EncodingError>;

    /// Decode a payload that the caller knows holds a number.
    fn decode_number(&self, payload: &EncodedPayload) -> Result<u64, EncodingError>;

    /// Decode a payload that the caller knows holds text.
    fn decode_text(&self, payload: &EncodedPayload) -> Result<String, EncodingError>;

    /// Decode a payload into the caller-named type.
    fn decode<T: Plaintext>(&self, payload: &EncodedPayload) -> Result<T, EncodingError>
    where
        Self: Sized,
    {
        T::decode_with(self, payload)
    }
}

/// Types a payload can be decoded into.
pub trait Plaintext: Sized {
    fn decode_with(encoder: &dyn Encoder, payload: &EncodedPayload) -> Result<Self, EncodingError>;
}

impl Plaintext for u64 {
    fn decode_with(encoder: &dyn Encoder, payload: &EncodedPayload) -> Result<Self, EncodingError> {
        encoder.decode_number(payload)
    }
}

impl Plaintext for String {
    fn decode_with(encoder: &dyn Encoder, payload: &EncodedPayload) -> Result<Self, EncodingError> {
        encoder.decode_text(payload)
    }
}

/// Canonical reversible encoding.
///
/// Numbers become their shortest decimal ASCII form, text its UTF-8 bytes.
/// This is an encoding, not encryption: anyone can decode it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalEncoder;

impl CanonicalEncoder {
    fn check_text(text: &str) -> Result<(), String> {
        if text.is_empty() {
            return Err("text must not be empty".to_string());
        }
        if text.len() > MAX_TEXT_BYTES {
            return Err(format!(
                "text is {} bytes, limit is {}",
                text.len(),
                MAX_TEXT_BYTES
            ));
        }
        if let Some(c) = text.chars().find(|c| c.is_control()) {
            return Err(format!("text contains control character {:?}", c));
        }
        Ok(())
    }
}

impl Encoder for CanonicalEncoder {
    fn encode(&self, value: &PlaintextValue) -> Result<EncodedPayload, EncodingError> {
        match value {
            PlaintextValue::Number(n) => Ok(EncodedPayload::from_bytes(n.to_string().into_bytes())),
            PlaintextValue::Text(text) => {
                Self::check_text(text).map_err(EncodingError::Unrepresentable)?;
                Ok(EncodedPayload::from_bytes(text.as_bytes().to_vec()))
            }
        }
    }

    fn decode_number(&self, payload: &EncodedPayload) -> Result<u64, EncodingError> {
        let bytes = payload.as_bytes();
        if bytes.is_empty() {
            return Err(EncodingError::Malformed("empty number payload".to_string()));
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(EncodingError::Malformed(
                "number payload contains non-digit bytes".to_string(),
            ));
        }
        if bytes.len() > 1 && bytes[0] == b'0' {
            return Err(EncodingError::Malformed(
                "number payload has a leading zero".to_string(),
            ));
        }

        // All bytes are ASCII digits, so the UTF-8 conversion cannot fail.
        let digits = std::str::from_utf8(bytes)
            .map_err(|e| EncodingError::Malformed(e.to_string()))?;
        digits
            .parse::<u64>()
            .map_err(|e| EncodingError::Malformed(format!("number out of range: {}", e)))
    }

    fn decode_text(&self, payload: &EncodedPayload) -> Result<String, EncodingError> {
        let text = String::from_utf8(payload.as_bytes().to_vec())
            .map_err(|e| EncodingError::Malformed(format!("invalid UTF-8: {}", e)))?;
        Self::check_text(&text).map_err(EncodingError::Malformed)?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: impl Into<PlaintextValue>) -> EncodedPayload {
        CanonicalEncoder.encode(&value.into()).unwrap()
    }

    #[test]
    fn test_number_round_trip() {
        for n in [0u64, 1, 7, 100, 255, 1_000_000, u64::MAX] {
            let payload = encode(n);
            assert_eq!(CanonicalEncoder.decode::<u64>(&payload).unwrap(), n);
        }
    }

    #[test]
    fn test_text_round_trip() {
        for text in ["Alpha", "QB", "Élite Crypto League", "名前", "a b c"] {
            let payload = encode(text);
            assert_eq!(CanonicalEncoder.decode::<String>(&payload).unwrap(), text);
        }
    }

    #[test]
    fn test_distinct_values_produce_distinct_payloads() {
        let numbers: Vec<_> = [0u64, 1, 10, 100, 101, u64::MAX].into_iter().map(encode).collect();
        for (i, a) in numbers.iter().enumerate() {
            for b in &numbers[i + 1..] {
                assert_ne!(a, b);
            }
        }

        assert_ne!(encode("Alpha"), encode("alpha"));
        assert_ne!(encode("Alpha"), encode("Alpha "));
    }

    #[test]
    fn test_payload_carries_no_type_tag() {
        // A number payload read as text yields its digits.
        let payload = encode(100u64);
        assert_eq!(CanonicalEncoder.decode::<String>(&payload).unwrap(), "100");
    }

    #[test]
    fn test_unrepresentable_text_is_rejected() {
        let cases = [
            String::new(),
            "nul\0byte".to_string(),
            "line\nbreak".to_string(),
            "x".repeat(MAX_TEXT_BYTES + 1),
        ];
        for text in cases {
            let err = CanonicalEncoder.encode(&PlaintextValue::Text(text)).unwrap_err();
            assert!(matches!(err, EncodingError::Unrepresentable(_)), "{err:?}");
        }

        let at_limit = "x".repeat(MAX_TEXT_BYTES);
        assert!(CanonicalEncoder.encode(&PlaintextValue::Text(at_limit)).is_ok());
    }

    #[test]
    fn test_malformed_number_payloads() {
        let cases: [&[u8]; 6] = [b"", b"007", b"12a", b"-1", b"+1", b"18446744073709551616"];
        for bytes in cases {
            let payload = EncodedPayload::from_bytes(bytes.to_vec());
            let err = CanonicalEncoder.decode_number(&payload).unwrap_err();
            assert!(matches!(err, EncodingError::Malformed(_)), "{:?}", bytes);
        }
    }

    #[test]
    fn test_invalid_utf8_text_payload() {
        let payload = EncodedPayload::from_bytes(vec![0xff, 0xfe, 0x41]);
        assert!(matches!(
            CanonicalEncoder.decode_text(&payload),
            Err(EncodingError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_through_trait_object() {
        let encoder: &dyn Encoder = &CanonicalEncoder;
        let payload = encoder.encode(&PlaintextValue::Number(42)).unwrap();
        assert_eq!(u64::decode_with(encoder, &payload).unwrap(), 42);
    }
}
