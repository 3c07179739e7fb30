//! Fuzz target for wire payload import and validation.
//!
//! ## Running
//!
//! ```bash
//! cd crates/hm-payload
//! cargo +nightly fuzz run fuzz_wire_import
//! ```

#![no_main]

use hm_payload::{MemoryContentStore, Payload, PayloadApi, PayloadConfig, PayloadStatus, WirePayload};
use libfuzzer_sys::fuzz_target;

/// Structured input so the fuzzer reaches signature checking, not just JSON parsing.
#[derive(Debug, arbitrary::Arbitrary)]
struct FuzzInput {
    raw: String,
    data: Vec<u8>,
    pubkey: Vec<u8>,
    sig: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    let mut payload = Payload::new(MemoryContentStore::new(), PayloadConfig::default());

    // Raw JSON path: must never panic, and a failure never leaves state behind
    if payload.import(&input.raw).is_err() {
        assert_eq!(payload.status(), PayloadStatus::Empty);
    }

    // Structured path: random bytes essentially never carry a valid signature
    let wire = WirePayload {
        data: input.data,
        pubkey: input.pubkey,
        sig: input.sig,
    };
    let before = payload.status();
    if payload.validate(&wire).is_err() {
        assert_eq!(payload.status(), before);
    }
});
