//! # Domain Layer
//!
//! Pure encoding and cryptographic logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod signer;
pub mod verifier;
