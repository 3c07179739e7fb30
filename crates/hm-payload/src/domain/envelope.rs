//! # Envelope Codec
//!
//! Canonical serialization of the signed envelope.
//!
//! The encoding is compact JSON with a fixed field order
//! (`message`, `timestamp`, `sigMethod`, `version`, `ttl`). The signature is
//! computed over these exact bytes once; nothing downstream re-serializes.

use super::entities::{Envelope, MAX_TTL_SECS};
use super::errors::PayloadError;

/// Check a TTL against `[1, MAX_TTL_SECS]`.
pub fn check_ttl(ttl: u64) -> Result<u64, PayloadError> {
    if ttl == 0 || ttl > MAX_TTL_SECS {
        return Err(PayloadError::InvalidTTL {
            ttl,
            max: MAX_TTL_SECS,
        });
    }
    Ok(ttl)
}

/// Encode a message into canonical envelope bytes.
///
/// # Errors
/// * `PayloadError::InvalidTTL` - `ttl` is 0 or above one week
pub fn encode(message: &[u8], ttl: u64, timestamp: u64) -> Result<Vec<u8>, PayloadError> {
    let ttl = check_ttl(ttl)?;
    encode_envelope(&Envelope::new(message, ttl, timestamp))
}

/// Serialize an already-built envelope.
pub fn encode_envelope(envelope: &Envelope) -> Result<Vec<u8>, PayloadError> {
    let bytes = serde_json::to_vec(envelope)
        .map_err(|e| PayloadError::MalformedEnvelope(e.to_string()))?;
    tracing::debug!(
        len = bytes.len(),
        ttl = envelope.ttl,
        "Encoded envelope"
    );
    Ok(bytes)
}

/// Decode envelope bytes.
///
/// Any missing or mistyped field, bad message base64, or trailing input is
/// rejected as a whole.
pub fn decode(bytes: &[u8]) -> Result<Envelope, PayloadError> {
    serde_json::from_slice(bytes).map_err(|e| PayloadError::MalformedEnvelope(e.to_string()))
}
