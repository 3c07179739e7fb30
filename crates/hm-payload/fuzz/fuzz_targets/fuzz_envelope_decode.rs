//! Fuzz target for envelope decoding.
//!
//! Arbitrary bytes must either decode to an envelope that re-encodes to a
//! decodable envelope, or fail with an error. Decoding never panics.
//!
//! ## Running
//!
//! ```bash
//! cd crates/hm-payload
//! cargo +nightly fuzz run fuzz_envelope_decode
//! ```

#![no_main]

use hm_payload::domain::envelope;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(decoded) = envelope::decode(data) {
        let encoded = envelope::encode_envelope(&decoded).expect("decoded envelope re-encodes");
        let again = envelope::decode(&encoded).expect("re-encoded envelope decodes");
        assert_eq!(decoded, again);
    }
});
