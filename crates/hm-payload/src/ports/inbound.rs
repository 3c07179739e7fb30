//! # Inbound Ports (Driving Ports / API)
//!
//! The synchronous payload operations callers drive. The store-facing
//! `get`/`post` live on the service itself because they are async.

use crate::domain::entities::{Envelope, GenerateOptions, WirePayload};
use crate::domain::errors::PayloadError;

/// Lifecycle of a payload instance.
///
/// A failed operation is reported as an error and never changes the status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadStatus {
    /// Nothing generated or validated yet
    Empty,
    /// Holds a payload built by `generate` (already self-validated)
    Generated,
    /// Holds a payload received through `validate`/`import`/`get`
    Validated,
}

/// Primary payload API.
///
/// Mutating operations take `&mut self`; one instance never sees
/// interleaved `generate`/`validate` calls.
pub trait PayloadApi {
    /// Build, sign and self-validate a payload, returning its wire JSON.
    ///
    /// # Errors
    /// * `PayloadError::InvalidTTL` - ttl outside `[1, 604800]`
    /// * `PayloadError::InvalidKeyLength` - key material is not 64 bytes
    /// * `PayloadError::MessageTooLarge` - message above 512 bytes
    fn generate(
        &mut self,
        secret_key_base64: &str,
        message: &[u8],
        options: GenerateOptions,
    ) -> Result<String, PayloadError>;

    /// Verify a wire payload and, on success, hold it.
    ///
    /// # Errors
    /// * `PayloadError::SignatureVerificationFailed` - signature does not verify
    /// * `PayloadError::MalformedEnvelope` - signed bytes are not an envelope
    /// * `PayloadError::MessageTooLarge` - message above 512 bytes
    fn validate(&mut self, payload: &WirePayload) -> Result<(), PayloadError>;

    /// Parse raw wire JSON and validate it.
    fn import(&mut self, raw: &str) -> Result<(), PayloadError>;

    /// Canonical wire JSON of the held payload.
    fn export(&self) -> Result<String, PayloadError>;

    /// The held wire payload.
    fn wire(&self) -> Result<&WirePayload, PayloadError>;

    /// The decoded envelope of the held payload.
    fn data(&self) -> Result<&Envelope, PayloadError>;

    /// The message of the held payload as bytes.
    fn message_bytes(&self) -> Result<&[u8], PayloadError>;

    /// The message of the held payload as UTF-8 text.
    fn message(&self) -> Result<String, PayloadError>;

    /// Current lifecycle status.
    fn status(&self) -> PayloadStatus;
}
