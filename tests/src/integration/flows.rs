//! # Integration Test Flows
//!
//! Two independent payload instances sharing one in-memory content store:
//!
//! 1. **Sender**: generates a payload and posts it
//! 2. **Store**: verifies and files it under the signer's content address
//! 3. **Receiver**: gets it by address and reads the message

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    use hm_payload::adapters::memory::Clock;
    use hm_payload::{
        content_address, now_nanos, ContentStore, GenerateOptions, MemoryContentStore, Payload,
        PayloadApi, PayloadConfig, PayloadError, PayloadStatus, SecretKeyMaterial, StoreError,
        DEFAULT_TTL_SECS, SIG_METHOD,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const SEC: u64 = 1_000_000_000;
    const ENDPOINT: &str = "memory://store";

    fn key(seed: u8) -> SecretKeyMaterial {
        SecretKeyMaterial::from_seed(&[seed; 32])
    }

    fn party(store: &Arc<MemoryContentStore>) -> Payload<Arc<MemoryContentStore>> {
        Payload::new(store.clone(), PayloadConfig::default().with_endpoint(ENDPOINT))
    }

    fn manual_clock(start: u64) -> (Arc<AtomicU64>, Clock) {
        let now = Arc::new(AtomicU64::new(start));
        let reader = now.clone();
        (now, Arc::new(move || reader.load(Ordering::SeqCst)))
    }

    // =============================================================================
    // SENDER → STORE → RECEIVER
    // =============================================================================

    /// Test: a posted payload is readable by anyone who knows the address
    #[tokio::test]
    async fn test_post_then_get_between_parties() {
        let store = Arc::new(MemoryContentStore::new());
        let sender_key = key(1);

        let mut sender = party(&store);
        sender
            .generate(&sender_key.to_base64(), b"hello", GenerateOptions::default())
            .unwrap();
        let response = sender.post(None).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, content_address(&sender_key.public_key()));

        let mut receiver = party(&store);
        receiver.get(Some(&response.body), None).await.unwrap();
        assert_eq!(receiver.status(), PayloadStatus::Validated);
        assert_eq!(receiver.message().unwrap(), "hello");

        let envelope = receiver.data().unwrap();
        assert_eq!(envelope.ttl, DEFAULT_TTL_SECS);
        assert_eq!(envelope.sig_method, SIG_METHOD);
        assert_eq!(receiver.export().unwrap(), sender.export().unwrap());
    }

    /// Test: exported JSON survives a text round trip and re-import
    #[tokio::test]
    async fn test_export_import_without_store() {
        let store = Arc::new(MemoryContentStore::new());
        let mut sender = party(&store);
        let json = sender
            .generate(&key(2).to_base64(), "héllo wörld".as_bytes(), GenerateOptions::default())
            .unwrap();

        let mut receiver = party(&store);
        receiver.import(&json).unwrap();
        assert_eq!(receiver.message().unwrap(), "héllo wörld");
        assert_eq!(receiver.wire().unwrap(), sender.wire().unwrap());
        assert!(store.is_empty());
    }

    /// Test: each signer has its own address; a later post replaces the earlier one
    #[tokio::test]
    async fn test_addresses_are_per_signer() {
        let store = Arc::new(MemoryContentStore::new());
        let (alice, bob) = (key(10), key(11));

        let mut a = party(&store);
        let earlier = GenerateOptions::default().with_timestamp(now_nanos() - SEC);
        a.generate(&alice.to_base64(), b"from alice", earlier)
            .unwrap();
        a.post(None).await.unwrap();

        let mut b = party(&store);
        b.generate(&bob.to_base64(), b"from bob", GenerateOptions::default())
            .unwrap();
        b.post(None).await.unwrap();
        assert_eq!(store.len(), 2);

        a.generate(&alice.to_base64(), b"alice again", GenerateOptions::default())
            .unwrap();
        a.post(None).await.unwrap();
        assert_eq!(store.len(), 2);

        let mut reader = party(&store);
        let alice_addr = content_address(&alice.public_key());
        reader.get(Some(&alice_addr), None).await.unwrap();
        assert_eq!(reader.message().unwrap(), "alice again");

        let bob_addr = content_address(&bob.public_key());
        reader.get(Some(&bob_addr), None).await.unwrap();
        assert_eq!(reader.message().unwrap(), "from bob");
    }

    /// Test: the store stops serving a payload once its TTL has elapsed
    #[tokio::test]
    async fn test_expired_payload_is_not_served() {
        let start = 1_700_000_000 * SEC;
        let (now, clock) = manual_clock(start);
        let store = Arc::new(MemoryContentStore::with_clock(clock));

        let mut sender = party(&store);
        sender
            .generate(
                &key(3).to_base64(),
                b"ephemeral",
                GenerateOptions::default().with_ttl(30).with_timestamp(start),
            )
            .unwrap();
        let address = sender.post(None).await.unwrap().body;

        let mut receiver = party(&store);
        now.store(start + 29 * SEC, Ordering::SeqCst);
        receiver.get(Some(&address), None).await.unwrap();
        assert_eq!(receiver.message().unwrap(), "ephemeral");

        now.store(start + 31 * SEC, Ordering::SeqCst);
        let result = receiver.get(Some(&address), None).await;
        assert!(matches!(
            result,
            Err(PayloadError::Store(StoreError::NotFound(_)))
        ));
        // The failed get leaves the earlier copy readable
        assert_eq!(receiver.message().unwrap(), "ephemeral");
    }

    /// Test: configured content address is used when none is passed
    #[tokio::test]
    async fn test_configured_content_address() {
        let store = Arc::new(MemoryContentStore::new());
        let signer = key(4);

        let mut sender = party(&store);
        sender
            .generate(&signer.to_base64(), b"configured", GenerateOptions::default())
            .unwrap();
        sender.post(None).await.unwrap();

        let config = PayloadConfig::default()
            .with_endpoint(ENDPOINT)
            .with_content_address(content_address(&signer.public_key()));
        let mut receiver = Payload::new(store.clone(), config);
        let wire = receiver.get(None, None).await.unwrap();
        assert_eq!(&wire, sender.wire().unwrap());
    }

    /// Test: the store can also be driven directly through the port
    #[tokio::test]
    async fn test_store_port_directly() {
        let store = MemoryContentStore::new();
        let mut sender = Payload::new(MemoryContentStore::new(), PayloadConfig::default());
        sender
            .generate(&key(5).to_base64(), b"direct", GenerateOptions::default())
            .unwrap();

        let response = store.submit(ENDPOINT, sender.wire().unwrap()).await.unwrap();
        let fetched = store.fetch(ENDPOINT, &response.body).await.unwrap();
        assert_eq!(&fetched, sender.wire().unwrap());
    }
}
