//! # Payload Verifier
//!
//! Signature and policy checks for received payloads.
//!
//! ## Security Notes
//!
//! - Verification never panics on malformed input: wrong-length keys or
//!   signatures and off-curve keys simply fail.
//! - The signature is checked over the exact received `data` bytes, before
//!   the envelope is parsed.

use super::entities::{
    Envelope, WirePayload, MAX_MESSAGE_SIZE, MAX_PAYLOAD_SIZE, PUBLIC_KEY_LENGTH,
    SIGNATURE_LENGTH,
};
use super::envelope;
use super::errors::PayloadError;
use ed25519_dalek::{Signature, Verifier as _, VerifyingKey};

/// Verify a detached Ed25519 signature.
///
/// Returns `false` for any malformed input instead of failing.
pub fn verify(signature: &[u8], data: &[u8], public_key: &[u8]) -> bool {
    let Ok(signature) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };
    let Ok(public_key) = <[u8; PUBLIC_KEY_LENGTH]>::try_from(public_key) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key) else {
        return false;
    };

    verifying_key
        .verify(data, &Signature::from_bytes(&signature))
        .is_ok()
}

/// [`verify`] as a `Result`.
pub fn check_signature(signature: &[u8], data: &[u8], public_key: &[u8]) -> Result<(), PayloadError> {
    if verify(signature, data, public_key) {
        Ok(())
    } else {
        Err(PayloadError::SignatureVerificationFailed)
    }
}

/// Check the decoded message against the size bound.
pub fn check_message_size(envelope: &Envelope) -> Result<(), PayloadError> {
    let size = envelope.message.len();
    if size > MAX_MESSAGE_SIZE {
        return Err(PayloadError::MessageTooLarge {
            size,
            max: MAX_MESSAGE_SIZE,
        });
    }
    Ok(())
}

/// Check a raw wire payload against the size bound.
pub fn check_payload_size(raw: &[u8]) -> Result<(), PayloadError> {
    if raw.len() > MAX_PAYLOAD_SIZE {
        return Err(PayloadError::PayloadTooLarge {
            size: raw.len(),
            max: MAX_PAYLOAD_SIZE,
        });
    }
    Ok(())
}

/// Full validation of a wire payload, returning its decoded envelope.
///
/// Order: signature over the raw `data` bytes, then envelope decoding, then
/// the message size bound. Any change to `data` or `sig` therefore fails as
/// `SignatureVerificationFailed` rather than as a decoding error.
pub fn verify_payload(payload: &WirePayload) -> Result<Envelope, PayloadError> {
    check_signature(&payload.sig, &payload.data, &payload.pubkey)?;
    let envelope = envelope::decode(&payload.data)?;
    check_message_size(&envelope)?;
    Ok(envelope)
}
