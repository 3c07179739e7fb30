//! # Ed25519 Signer
//!
//! Signs envelope bytes with 64-byte expanded key material (seed ‖ public key).
//!
//! ## Key Layout
//!
//! The public key placed on the wire is bytes `32..64` of the key material,
//! taken as-is. It is not recomputed from the seed: existing signers produce
//! this layout and payloads must stay byte-compatible with them. Material
//! whose upper half does not match its seed yields a signature that fails
//! verification against the advertised key.

use super::entities::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use super::errors::PayloadError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::{Signer as _, SigningKey};
use std::fmt;
use zeroize::Zeroize;

/// 64-byte secret key material.
pub struct SecretKeyMaterial([u8; SECRET_KEY_LENGTH]);

impl SecretKeyMaterial {
    /// Expand a 32-byte seed into seed ‖ public key.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self(SigningKey::from_bytes(seed).to_keypair_bytes())
    }

    /// Take key material from raw bytes.
    ///
    /// # Errors
    /// * `PayloadError::InvalidKeyLength` - input is not exactly 64 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(PayloadError::InvalidKeyLength {
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut material = [0u8; SECRET_KEY_LENGTH];
        material.copy_from_slice(bytes);
        Ok(Self(material))
    }

    /// Decode standard base64 key material.
    pub fn from_base64(encoded: &str) -> Result<Self, PayloadError> {
        let mut bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| PayloadError::MalformedPayload(format!("secret key: {e}")))?;
        let result = Self::from_bytes(&bytes);
        bytes.zeroize();
        result
    }

    /// Standard base64 of the full 64 bytes, the form `generate` accepts.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.0)
    }

    /// Public key as carried in the upper half of the material.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let mut public_key = [0u8; PUBLIC_KEY_LENGTH];
        public_key.copy_from_slice(&self.0[32..]);
        public_key
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&self.0[..32]);
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        signing_key.sign(message).to_bytes()
    }
}

impl fmt::Debug for SecretKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKeyMaterial")
            .field("public_key", &STANDARD.encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

impl Drop for SecretKeyMaterial {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Sign envelope bytes, returning the detached signature and the public key.
///
/// # Errors
/// * `PayloadError::InvalidKeyLength` - key material is not 64 bytes
pub fn sign(
    secret_key_material: &[u8],
    envelope_bytes: &[u8],
) -> Result<([u8; SIGNATURE_LENGTH], [u8; PUBLIC_KEY_LENGTH]), PayloadError> {
    let material = SecretKeyMaterial::from_bytes(secret_key_material)?;
    let signature = material.sign(envelope_bytes);
    tracing::debug!(len = envelope_bytes.len(), "Signed envelope bytes");
    Ok((signature, material.public_key()))
}
