//! # Adversarial Flows
//!
//! Payloads altered in transit, replayed, or oversized. The receiver and the
//! store must both refuse them, and neither may lose what it already holds.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use hm_payload::domain::envelope;
    use hm_payload::{
        content_address, ContentStore, Envelope, GenerateOptions, MemoryContentStore, Payload,
        PayloadApi, PayloadConfig, PayloadError, PayloadStatus, SecretKeyMaterial, StoreError,
        SubmitResponse, WirePayload, MAX_MESSAGE_SIZE, MAX_PAYLOAD_SIZE,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const ENDPOINT: &str = "memory://store";

    /// Store that hands back whatever it was built with, like a hostile server.
    struct HostileStore {
        payload: WirePayload,
    }

    #[async_trait]
    impl ContentStore for HostileStore {
        async fn fetch(
            &self,
            _endpoint: &str,
            _content_address: &str,
        ) -> Result<WirePayload, StoreError> {
            Ok(self.payload.clone())
        }

        async fn submit(
            &self,
            _endpoint: &str,
            _payload: &WirePayload,
        ) -> Result<SubmitResponse, StoreError> {
            Ok(SubmitResponse {
                status: 200,
                body: String::new(),
            })
        }
    }

    fn signed_wire(seed: u8, message: &[u8]) -> WirePayload {
        let mut sender = Payload::new(MemoryContentStore::new(), PayloadConfig::default());
        sender
            .generate(
                &SecretKeyMaterial::from_seed(&[seed; 32]).to_base64(),
                message,
                GenerateOptions::default(),
            )
            .unwrap();
        sender.wire().unwrap().clone()
    }

    fn receiver_of(payload: WirePayload) -> Payload<HostileStore> {
        Payload::new(
            HostileStore { payload },
            PayloadConfig::default()
                .with_endpoint(ENDPOINT)
                .with_content_address("anything"),
        )
    }

    // =============================================================================
    // TAMPERING
    // =============================================================================

    /// Test: a server rewriting the message is caught by the signature
    #[tokio::test]
    async fn test_rewritten_message_rejected() {
        let wire = signed_wire(1, b"pay alice 10");
        let original = envelope::decode(&wire.data).unwrap();
        let forged = Envelope {
            message: b"pay mallory 10".to_vec(),
            ..original
        };
        let tampered = WirePayload {
            data: envelope::encode_envelope(&forged).unwrap(),
            ..wire
        };

        let mut receiver = receiver_of(tampered);
        assert!(matches!(
            receiver.get(None, None).await,
            Err(PayloadError::SignatureVerificationFailed)
        ));
        assert_eq!(receiver.status(), PayloadStatus::Empty);
    }

    /// Test: stretching the TTL invalidates the signature
    #[tokio::test]
    async fn test_extended_ttl_rejected() {
        let wire = signed_wire(1, b"short lived");
        let original = envelope::decode(&wire.data).unwrap();
        let stretched = Envelope {
            ttl: original.ttl + 1,
            ..original
        };
        let tampered = WirePayload {
            data: envelope::encode_envelope(&stretched).unwrap(),
            ..wire
        };
        let mut receiver = receiver_of(tampered);
        assert!(matches!(
            receiver.get(None, None).await,
            Err(PayloadError::SignatureVerificationFailed)
        ));
    }

    /// Test: swapping in another signer's public key fails verification
    #[tokio::test]
    async fn test_substituted_pubkey_rejected() {
        let wire = signed_wire(1, b"mine");
        let other = signed_wire(2, b"theirs");
        let swapped = WirePayload {
            pubkey: other.pubkey,
            ..wire
        };
        let mut receiver = receiver_of(swapped);
        assert!(matches!(
            receiver.get(None, None).await,
            Err(PayloadError::SignatureVerificationFailed)
        ));
    }

    /// Test: truncated signature or key bytes fail without panicking
    #[test]
    fn test_truncated_fields_rejected() {
        let wire = signed_wire(1, b"x");
        let mut receiver = Payload::new(MemoryContentStore::new(), PayloadConfig::default());

        let short_sig = WirePayload {
            sig: wire.sig[..63].to_vec(),
            ..wire.clone()
        };
        assert!(receiver.validate(&short_sig).is_err());

        let short_key = WirePayload {
            pubkey: wire.pubkey[..31].to_vec(),
            ..wire.clone()
        };
        assert!(receiver.validate(&short_key).is_err());

        let empty = WirePayload {
            data: Vec::new(),
            pubkey: Vec::new(),
            sig: Vec::new(),
        };
        assert!(receiver.validate(&empty).is_err());
        assert_eq!(receiver.status(), PayloadStatus::Empty);
    }

    /// Test: base64 fields that are not base64 are malformed payloads
    #[test]
    fn test_non_base64_fields_rejected() {
        let wire = signed_wire(1, b"x");
        let raw = serde_json::json!({
            "data": STANDARD.encode(&wire.data),
            "pubkey": "not*base64",
            "sig": STANDARD.encode(&wire.sig),
        })
        .to_string();
        let mut receiver = Payload::new(MemoryContentStore::new(), PayloadConfig::default());
        assert!(matches!(
            receiver.import(&raw),
            Err(PayloadError::MalformedPayload(_))
        ));
    }

    // =============================================================================
    // STORE DEFENCES
    // =============================================================================

    /// Test: the memory store refuses tampered submissions and keeps the good copy
    #[tokio::test]
    async fn test_store_keeps_good_copy_after_tampered_submit() {
        let store = Arc::new(MemoryContentStore::new());
        let good = signed_wire(7, b"genuine");
        let address = store.submit(ENDPOINT, &good).await.unwrap().body;

        let mut forged = good.clone();
        forged.data[5] ^= 0x04;
        assert!(matches!(
            store.submit(ENDPOINT, &forged).await,
            Err(StoreError::Rejected { .. })
        ));

        let mut receiver = Payload::new(
            store.clone(),
            PayloadConfig::default().with_endpoint(ENDPOINT),
        );
        receiver.get(Some(&address), None).await.unwrap();
        assert_eq!(receiver.message().unwrap(), "genuine");
        assert_eq!(address, content_address(&good.pubkey));
    }

    // =============================================================================
    // SIZE LIMITS
    // =============================================================================

    /// Test: the message bound holds on both sides
    #[test]
    fn test_message_bound() {
        let mut sender = Payload::new(MemoryContentStore::new(), PayloadConfig::default());
        let key = SecretKeyMaterial::from_seed(&[9; 32]).to_base64();

        let json = sender
            .generate(&key, &vec![b'a'; MAX_MESSAGE_SIZE], GenerateOptions::default())
            .unwrap();
        let mut receiver = Payload::new(MemoryContentStore::new(), PayloadConfig::default());
        receiver.import(&json).unwrap();
        assert_eq!(receiver.message_bytes().unwrap().len(), MAX_MESSAGE_SIZE);

        assert!(matches!(
            sender.generate(&key, &vec![b'a'; MAX_MESSAGE_SIZE + 1], GenerateOptions::default()),
            Err(PayloadError::MessageTooLarge { .. })
        ));
    }

    /// Test: oversized raw input is refused before parsing
    #[test]
    fn test_oversized_import() {
        let padding = "A".repeat(MAX_PAYLOAD_SIZE);
        let raw = format!(r#"{{"data":"{padding}","pubkey":"","sig":""}}"#);
        let mut receiver = Payload::new(MemoryContentStore::new(), PayloadConfig::default());
        assert!(matches!(
            receiver.import(&raw),
            Err(PayloadError::PayloadTooLarge { .. })
        ));
    }
}
