//! # Outbound Ports (Driven Ports / SPI)
//!
//! The content store this crate reads payloads from and submits them to.

use crate::domain::entities::WirePayload;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from content store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No payload stored under the address (or it has expired)
    #[error("No payload at content address {0}")]
    NotFound(String),

    /// The store answered with a failure status
    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The store's response could not be decoded
    #[error("Failed to decode store response: {0}")]
    Decode(String),

    /// The store's response exceeded the payload size bound
    #[error("Store response too large: {0} bytes")]
    TooLarge(usize),

    /// The submitted payload was rejected
    #[error("Payload rejected: {reason}")]
    Rejected { reason: String },

    /// Communication error
    #[error("Transport error: {0}")]
    Transport(String),
}

/// What a store reports back after accepting a submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    /// HTTP-style status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

/// Addressable content store holding wire payloads.
///
/// The store, not the caller, decides the content address of a submission.
/// Timeouts and retries are the implementation's business.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch the payload stored at `content_address` (GET `{endpoint}/{content_address}`).
    ///
    /// # Errors
    /// * `StoreError::NotFound` - nothing stored at the address
    /// * `StoreError::Decode` - the stored bytes are not a wire payload
    async fn fetch(&self, endpoint: &str, content_address: &str)
        -> Result<WirePayload, StoreError>;

    /// Submit a payload (POST `{endpoint}` with a JSON body).
    ///
    /// # Errors
    /// * `StoreError::Rejected` - the store refused the payload
    async fn submit(&self, endpoint: &str, payload: &WirePayload)
        -> Result<SubmitResponse, StoreError>;
}

/// Lets several payload instances share one store.
#[async_trait::async_trait]
impl<T: ContentStore + ?Sized> ContentStore for std::sync::Arc<T> {
    async fn fetch(
        &self,
        endpoint: &str,
        content_address: &str,
    ) -> Result<WirePayload, StoreError> {
        (**self).fetch(endpoint, content_address).await
    }

    async fn submit(
        &self,
        endpoint: &str,
        payload: &WirePayload,
    ) -> Result<SubmitResponse, StoreError> {
        (**self).submit(endpoint, payload).await
    }
}
