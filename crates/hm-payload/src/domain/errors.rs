//! # Payload Errors
//!
//! Closed error taxonomy for payload construction and validation.

use crate::ports::outbound::StoreError;
use thiserror::Error;

/// Errors that can occur while building, validating or moving payloads.
///
/// No operation that returns one of these has mutated the payload it ran on.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// TTL outside `[1, MAX_TTL_SECS]`
    #[error("Invalid TTL: {ttl}s (must be between 1 and {max}s)")]
    InvalidTTL { ttl: u64, max: u64 },

    /// Secret key material is not 64 bytes after decoding
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Envelope bytes could not be decoded
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// Wire payload JSON or one of its base64 fields could not be decoded
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Decoded message exceeds the size bound
    #[error("Message too large: {size} bytes (max {max})")]
    MessageTooLarge { size: usize, max: usize },

    /// Raw wire payload exceeds the size bound
    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// Signature does not verify over the envelope bytes
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Endpoint or content address required but not supplied
    #[error("Missing configuration: {0}")]
    MissingConfiguration(&'static str),

    /// Accessor called before a payload was generated or validated
    #[error("Payload has not been validated")]
    NotValidated,

    /// Content store failure
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),
}

impl PayloadError {
    /// Short, stable name of the error kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            PayloadError::InvalidTTL { .. } => "invalid_ttl",
            PayloadError::InvalidKeyLength { .. } => "invalid_key_length",
            PayloadError::MalformedEnvelope(_) => "malformed_envelope",
            PayloadError::MalformedPayload(_) => "malformed_payload",
            PayloadError::MessageTooLarge { .. } => "message_too_large",
            PayloadError::PayloadTooLarge { .. } => "payload_too_large",
            PayloadError::SignatureVerificationFailed => "signature_verification_failed",
            PayloadError::MissingConfiguration(_) => "missing_configuration",
            PayloadError::NotValidated => "not_validated",
            PayloadError::Store(_) => "store",
        }
    }
}
