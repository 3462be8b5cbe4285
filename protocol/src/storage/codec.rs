//! # Payload Codec
//!
//! A record's payload is stored as the hex encoding of its JSON form. The
//! chain never looks inside; only the registry encodes claims and decodes
//! them back for address lookups.
//!
//! Decoding is all-or-nothing. Bad hex, bytes that are not UTF-8, and JSON
//! that does not fit the target type are all reported as errors; a partially
//! populated value is never returned.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from encoding or decoding a record payload.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The payload is not valid hex.
    #[error("payload is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The decoded bytes are not UTF-8 text.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The JSON could not be produced or did not match the expected shape.
    #[error("payload JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize `value` to JSON and hex-encode it.
pub fn encode_payload<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_string(value)?;
    Ok(hex::encode(json.as_bytes()))
}

/// Reverse of [`encode_payload`].
pub fn decode_payload<T: DeserializeOwned>(payload: &str) -> Result<T, CodecError> {
    let bytes = hex::decode(payload)?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        value: u32,
    }

    #[test]
    fn encoded_payload_is_hex_of_json() {
        let encoded = encode_payload(&Sample {
            name: "vega".into(),
            value: 7,
        })
        .unwrap();
        let raw = String::from_utf8(hex::decode(&encoded).unwrap()).unwrap();
        assert_eq!(raw, r#"{"name":"vega","value":7}"#);
    }

    #[test]
    fn decode_recovers_value() {
        let original = Sample {
            name: "sirius".into(),
            value: 1,
        };
        let decoded: Sample = decode_payload(&encode_payload(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_rejects_bad_hex() {
        let err = decode_payload::<Sample>("xyz").unwrap_err();
        assert!(matches!(err, CodecError::Hex(_)));
    }

    #[test]
    fn decode_rejects_non_utf8() {
        let err = decode_payload::<Sample>("ff").unwrap_err();
        assert!(matches!(err, CodecError::Utf8(_)));
    }

    #[test]
    fn decode_rejects_shape_mismatch() {
        // Valid JSON, but missing the `value` field.
        let payload = hex::encode(r#"{"name":"rigel"}"#);
        let err = decode_payload::<Sample>(&payload).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }
}
