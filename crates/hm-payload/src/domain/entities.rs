//! # Domain Entities
//!
//! The signed envelope and the wire payload that carries it.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

// =============================================================================
// PROTOCOL CONSTANTS
// =============================================================================

/// Signature method tag carried in every envelope.
pub const SIG_METHOD: &str = "nacl-sign-ed25519";

/// Protocol version carried in every envelope.
pub const PROTOCOL_VERSION: &str = "0.0.1";

/// Maximum decoded message length in bytes.
pub const MAX_MESSAGE_SIZE: usize = 512;

/// Default TTL: one day.
pub const DEFAULT_TTL_SECS: u64 = 86_400;

/// Maximum TTL: one week.
pub const MAX_TTL_SECS: u64 = 604_800;

/// Maximum raw wire payload size accepted on import (128 KiB).
pub const MAX_PAYLOAD_SIZE: usize = 128 * 1024;

/// Allowed clock drift between a submitter and a store.
pub const MAX_SUBMIT_WINDOW: Duration = Duration::from_secs(5);

/// Secret key material: 32-byte seed followed by the 32-byte public key.
pub const SECRET_KEY_LENGTH: usize = 64;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 detached signature length.
pub const SIGNATURE_LENGTH: usize = 64;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Current wall-clock time in nanoseconds since the Unix epoch.
///
/// A clock set before 1970 reads as 0.
pub fn now_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

// =============================================================================
// ENVELOPE
// =============================================================================

/// The signed content of a payload.
///
/// Field order is the canonical serialization order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Message bytes, base64 inside the JSON
    #[serde(with = "base64_bytes")]
    pub message: Vec<u8>,
    /// Creation time in nanoseconds since the Unix epoch
    pub timestamp: u64,
    /// Signature algorithm tag
    pub sig_method: String,
    /// Protocol version
    pub version: String,
    /// Time-to-live in seconds
    pub ttl: u64,
}

impl Envelope {
    /// Build an envelope with the current protocol tags.
    pub fn new(message: impl Into<Vec<u8>>, ttl: u64, timestamp: u64) -> Self {
        Self {
            message: message.into(),
            timestamp,
            sig_method: SIG_METHOD.to_string(),
            version: PROTOCOL_VERSION.to_string(),
            ttl,
        }
    }

    /// Instant (ns since epoch) after which the payload is stale.
    pub fn expires_at_nanos(&self) -> u64 {
        self.timestamp
            .saturating_add(self.ttl.saturating_mul(NANOS_PER_SEC))
    }

    /// Whether `reference_nanos` lies past the envelope's TTL.
    pub fn is_expired(&self, reference_nanos: u64) -> bool {
        reference_nanos > self.expires_at_nanos()
    }

    /// Whether the timestamp is further ahead of `reference_nanos` than the submit window.
    pub fn is_in_future(&self, reference_nanos: u64) -> bool {
        let window = MAX_SUBMIT_WINDOW.as_nanos() as u64;
        self.timestamp > reference_nanos.saturating_add(window)
    }

    /// Whether the timestamp is within the submit window of `reference_nanos`, in either direction.
    pub fn within_submit_window(&self, reference_nanos: u64) -> bool {
        let window = MAX_SUBMIT_WINDOW.as_nanos() as u64;
        self.timestamp.abs_diff(reference_nanos) <= window
    }
}

// =============================================================================
// WIRE PAYLOAD
// =============================================================================

/// The transmitted form: three independently base64-encoded byte fields.
///
/// Lengths are not checked here; a payload with a short key or signature is
/// representable and simply fails verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePayload {
    /// Serialized envelope bytes
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    /// Public key of the signer
    #[serde(with = "base64_bytes")]
    pub pubkey: Vec<u8>,
    /// Detached signature over `data`
    #[serde(with = "base64_bytes")]
    pub sig: Vec<u8>,
}

// =============================================================================
// GENERATE OPTIONS
// =============================================================================

/// Per-call options for `generate`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// TTL in seconds; the configured default when `None`
    pub ttl: Option<u64>,
    /// Timestamp override in ns; the current time when `None`
    pub timestamp: Option<u64>,
}

impl GenerateOptions {
    pub fn with_ttl(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Standard (padded) base64 for byte fields.
pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(de::Error::custom)
    }
}
