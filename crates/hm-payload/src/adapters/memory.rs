//! In-memory content store.
//!
//! Accepts only payloads that pass full validation plus the submit policy
//! (TTL range, protocol version, timestamp within the submit window of now),
//! addresses them by the signer's public key, and stops serving them once
//! their TTL has elapsed. One process-local map serves every endpoint.
//!
//! The content address scheme is this store's own; other stores may assign
//! addresses differently.

use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::RwLock;
use sha2::{Digest, Sha512};

use crate::domain::entities::{now_nanos, Envelope, WirePayload, PROTOCOL_VERSION};
use crate::domain::{envelope, verifier};
use crate::ports::outbound::{ContentStore, StoreError, SubmitResponse};

/// Source of "now" in nanoseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Content address for a signer: URL-safe base64 of SHA-512 over the public key.
pub fn content_address(public_key: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha512::digest(public_key))
}

struct StoredPayload {
    payload: WirePayload,
    envelope: Envelope,
}

/// Process-local content store.
pub struct MemoryContentStore {
    entries: RwLock<HashMap<String, StoredPayload>>,
    clock: Clock,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(now_nanos))
    }

    /// Create a store that reads time from `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of entries, expired ones included until purged.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = (self.clock)();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, stored| !stored.envelope.is_expired(now));
        before - entries.len()
    }
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn rejected(e: impl std::fmt::Display) -> StoreError {
    StoreError::Rejected {
        reason: e.to_string(),
    }
}

/// Policy a signed envelope must meet at submit time.
fn check_submit_policy(envelope: &Envelope, now: u64) -> Result<(), &'static str> {
    if envelope::check_ttl(envelope.ttl).is_err() {
        return Err("invalid payload ttl");
    }
    if envelope.version != PROTOCOL_VERSION {
        return Err("invalid payload version");
    }
    if envelope.is_expired(now) {
        return Err("payload ttl is expired");
    }
    if envelope.is_in_future(now) {
        return Err("payload timestamp is too far in the future");
    }
    if !envelope.within_submit_window(now) {
        return Err("timestamp is outside of submit window");
    }
    Ok(())
}

#[async_trait::async_trait]
impl ContentStore for MemoryContentStore {
    async fn fetch(
        &self,
        _endpoint: &str,
        content_address: &str,
    ) -> Result<WirePayload, StoreError> {
        let now = (self.clock)();
        let entries = self.entries.read();
        match entries.get(content_address) {
            Some(stored) if !stored.envelope.is_expired(now) => Ok(stored.payload.clone()),
            _ => Err(StoreError::NotFound(content_address.to_string())),
        }
    }

    async fn submit(
        &self,
        _endpoint: &str,
        payload: &WirePayload,
    ) -> Result<SubmitResponse, StoreError> {
        let envelope = verifier::verify_payload(payload).map_err(rejected)?;
        let now = (self.clock)();
        check_submit_policy(&envelope, now).map_err(|reason| {
            tracing::debug!(%reason, "Rejected payload");
            StoreError::Rejected {
                reason: reason.into(),
            }
        })?;

        let address = content_address(&payload.pubkey);
        let mut entries = self.entries.write();
        if let Some(existing) = entries.get(&address) {
            // Never replace a payload with an older one from the same signer
            if existing.envelope.timestamp > envelope.timestamp
                && !existing.envelope.is_expired(now)
            {
                return Err(StoreError::Rejected {
                    reason: "a newer payload is already stored".into(),
                });
            }
        }
        entries.insert(
            address.clone(),
            StoredPayload {
                payload: payload.clone(),
                envelope,
            },
        );
        tracing::debug!(content_address = %address, "Stored payload");

        Ok(SubmitResponse {
            status: 200,
            body: address,
        })
    }
}
