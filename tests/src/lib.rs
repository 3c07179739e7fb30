//! # Hashmap Payload Test Suite
//!
//! End-to-end flows that cross crate boundaries: payloads generated by one
//! party, moved through a content store and validated by another.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs        # generate → post → get → validate
//!     └── adversarial.rs  # tampering, replay and oversized input
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p hm-tests
//! cargo test -p hm-tests integration::adversarial::
//! ```

pub mod integration;
