//! # Hashmap Signed Payloads
//!
//! Builds, signs, verifies and transports small self-describing messages for
//! a public-key-addressed content store.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): Envelope codec, Ed25519 signing and verification, no I/O
//! - **Ports Layer** (`ports/`): Trait definitions for inbound/outbound interfaces
//! - **Adapters Layer** (`adapters/`): HTTP and in-memory content stores
//! - **Service Layer** (`service.rs`): The `Payload` façade wiring domain logic to ports
//!
//! ## Wire Format
//!
//! A wire payload is JSON `{"data", "pubkey", "sig"}` with every field in
//! standard base64. `data` is the compact JSON envelope
//! `{"message","timestamp","sigMethod","version","ttl"}` and `sig` is a
//! detached Ed25519 signature over exactly those bytes.
//!
//! ## Security Notes
//!
//! - The signature is checked before the envelope is parsed; tampered bytes
//!   always surface as `SignatureVerificationFailed`
//! - Secret key material is zeroized on drop and never logged

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use adapters::memory::content_address;
pub use adapters::{HttpContentStore, MemoryContentStore};
pub use config::{ConfigError, PayloadConfig};
pub use domain::entities::{
    now_nanos, Envelope, GenerateOptions, WirePayload, DEFAULT_TTL_SECS, MAX_MESSAGE_SIZE,
    MAX_PAYLOAD_SIZE, MAX_TTL_SECS, PROTOCOL_VERSION, SIG_METHOD,
};
pub use domain::errors::PayloadError;
pub use domain::signer::SecretKeyMaterial;
pub use domain::verifier::verify_payload;
pub use ports::inbound::{PayloadApi, PayloadStatus};
pub use ports::outbound::{ContentStore, StoreError, SubmitResponse};
pub use service::Payload;
