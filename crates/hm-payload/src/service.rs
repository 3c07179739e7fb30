//! # Payload Service
//!
//! Application service layer that implements the `PayloadApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`PayloadApi`)
//! - Uses the outbound port (`ContentStore`) for `get`/`post`
//! - Delegates encoding and cryptography to the domain layer
//!
//! ## State
//!
//! An instance holds at most one payload. Every path that installs a payload
//! (`generate`, `validate`, `import`, `get`) runs the full verification first
//! and only then replaces the held payload, so a failure leaves the previous
//! one readable.

use crate::adapters::http::HttpContentStore;
use crate::config::PayloadConfig;
use crate::domain::entities::{now_nanos, Envelope, GenerateOptions, WirePayload};
use crate::domain::envelope;
use crate::domain::errors::PayloadError;
use crate::domain::signer::SecretKeyMaterial;
use crate::domain::verifier;
use crate::ports::inbound::{PayloadApi, PayloadStatus};
use crate::ports::outbound::{ContentStore, SubmitResponse};

/// A verified payload together with its decoded envelope and wire JSON.
#[derive(Clone, Debug)]
struct HeldPayload {
    status: PayloadStatus,
    wire: WirePayload,
    envelope: Envelope,
    json: String,
}

impl HeldPayload {
    /// Run the full validation path over `wire`.
    fn verify(wire: WirePayload, status: PayloadStatus) -> Result<Self, PayloadError> {
        let envelope = verifier::verify_payload(&wire)?;
        let json = serde_json::to_string(&wire)
            .map_err(|e| PayloadError::MalformedPayload(e.to_string()))?;
        Ok(Self {
            status,
            wire,
            envelope,
            json,
        })
    }
}

/// Payload façade.
///
/// Builds and verifies payloads and moves them through a content store.
pub struct Payload<S: ContentStore> {
    store: S,
    config: PayloadConfig,
    held: Option<HeldPayload>,
}

impl Payload<HttpContentStore> {
    /// Create a payload client talking HTTP, with timeouts from `config`.
    pub fn http(config: PayloadConfig) -> Result<Self, PayloadError> {
        let store = HttpContentStore::from_config(&config)?;
        Ok(Self::new(store, config))
    }
}

impl<S: ContentStore> Payload<S> {
    /// Create an empty payload bound to a store and configuration.
    pub fn new(store: S, config: PayloadConfig) -> Self {
        Self {
            store,
            config,
            held: None,
        }
    }

    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn held(&self) -> Result<&HeldPayload, PayloadError> {
        self.held.as_ref().ok_or(PayloadError::NotValidated)
    }

    fn commit(&mut self, held: HeldPayload) {
        tracing::info!(
            status = ?held.status,
            ttl = held.envelope.ttl,
            message_len = held.envelope.message.len(),
            "Payload accepted"
        );
        self.held = Some(held);
    }

    /// Fetch a payload from the store, validate it and hold it.
    ///
    /// Per-call arguments override the configured content address and endpoint.
    ///
    /// # Errors
    /// * `PayloadError::MissingConfiguration` - no content address or endpoint
    /// * `PayloadError::Store` - the store call failed
    /// * any validation error; the held payload is then unchanged
    pub async fn get(
        &mut self,
        content_address: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<WirePayload, PayloadError> {
        let content_address = self
            .config
            .resolve_content_address(content_address)?
            .to_owned();
        let endpoint = self.config.resolve_endpoint(endpoint)?.to_owned();

        let wire = self.store.fetch(&endpoint, &content_address).await?;
        tracing::debug!(%content_address, %endpoint, "Fetched payload");

        self.validate(&wire)?;
        Ok(wire)
    }

    /// Submit the held payload to the store.
    ///
    /// # Errors
    /// * `PayloadError::NotValidated` - nothing generated or validated yet
    /// * `PayloadError::MissingConfiguration` - no endpoint
    /// * `PayloadError::Store` - the store call failed
    pub async fn post(&self, endpoint: Option<&str>) -> Result<SubmitResponse, PayloadError> {
        let held = self.held()?;
        let endpoint = self.config.resolve_endpoint(endpoint)?;

        let response = self.store.submit(endpoint, &held.wire).await?;
        tracing::info!(
            %endpoint,
            status = response.status,
            "Payload submitted"
        );
        Ok(response)
    }
}

impl<S: ContentStore> PayloadApi for Payload<S> {
    fn generate(
        &mut self,
        secret_key_base64: &str,
        message: &[u8],
        options: GenerateOptions,
    ) -> Result<String, PayloadError> {
        let ttl = envelope::check_ttl(options.ttl.unwrap_or(self.config.default_ttl))?;
        let timestamp = options.timestamp.unwrap_or_else(now_nanos);
        let material = SecretKeyMaterial::from_base64(secret_key_base64)?;

        let data = envelope::encode(message, ttl, timestamp)?;
        let sig = material.sign(&data);
        let wire = WirePayload {
            data,
            pubkey: material.public_key().to_vec(),
            sig: sig.to_vec(),
        };

        // A freshly generated payload must pass the same checks as a received one
        let held = HeldPayload::verify(wire, PayloadStatus::Generated).map_err(|e| {
            tracing::warn!(error = %e, kind = e.kind(), "Generated payload failed self-check");
            e
        })?;
        let json = held.json.clone();
        self.commit(held);
        Ok(json)
    }

    fn validate(&mut self, payload: &WirePayload) -> Result<(), PayloadError> {
        let held =
            HeldPayload::verify(payload.clone(), PayloadStatus::Validated).map_err(|e| {
                tracing::warn!(error = %e, kind = e.kind(), "Payload validation failed");
                e
            })?;
        self.commit(held);
        Ok(())
    }

    fn import(&mut self, raw: &str) -> Result<(), PayloadError> {
        verifier::check_payload_size(raw.as_bytes())?;
        let wire: WirePayload = serde_json::from_str(raw)
            .map_err(|e| PayloadError::MalformedPayload(e.to_string()))?;
        self.validate(&wire)
    }

    fn export(&self) -> Result<String, PayloadError> {
        Ok(self.held()?.json.clone())
    }

    fn wire(&self) -> Result<&WirePayload, PayloadError> {
        Ok(&self.held()?.wire)
    }

    fn data(&self) -> Result<&Envelope, PayloadError> {
        Ok(&self.held()?.envelope)
    }

    fn message_bytes(&self) -> Result<&[u8], PayloadError> {
        Ok(&self.held()?.envelope.message)
    }

    fn message(&self) -> Result<String, PayloadError> {
        String::from_utf8(self.message_bytes()?.to_vec())
            .map_err(|e| PayloadError::MalformedEnvelope(format!("message is not UTF-8: {e}")))
    }

    fn status(&self) -> PayloadStatus {
        self.held
            .as_ref()
            .map(|held| held.status)
            .unwrap_or(PayloadStatus::Empty)
    }
}

// =============================================================================
// TESTS
// =============================================================================
