//! HTTP content store client.
//!
//! GET `{endpoint}/{content_address}` returns a wire payload;
//! POST `{endpoint}` with the wire payload as JSON submits one.

use std::time::Duration;

use reqwest::{Client, Response};

use crate::config::PayloadConfig;
use crate::domain::entities::{WirePayload, MAX_PAYLOAD_SIZE};
use crate::ports::outbound::{ContentStore, StoreError, SubmitResponse};

/// Content store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpContentStore {
    client: Client,
}

impl HttpContentStore {
    /// Create a client with explicit timeouts.
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create a client with the timeouts from `config`.
    pub fn from_config(config: &PayloadConfig) -> Result<Self, StoreError> {
        Self::new(config.request_timeout(), config.connect_timeout())
    }

    /// Read a response body, refusing bodies above the payload bound.
    ///
    /// Reads chunk by chunk so an unbounded body is cut off at the limit.
    async fn read_body(mut response: Response) -> Result<Vec<u8>, StoreError> {
        if let Some(len) = response.content_length() {
            if len > MAX_PAYLOAD_SIZE as u64 {
                return Err(StoreError::TooLarge(len as usize));
            }
        }
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(transport_error)? {
            let size = body.len() + chunk.len();
            if size > MAX_PAYLOAD_SIZE {
                return Err(StoreError::TooLarge(size));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

/// Join a base URL and an address with exactly one slash.
pub fn fetch_url(endpoint: &str, content_address: &str) -> String {
    format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        content_address.trim_start_matches('/')
    )
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Transport(format!("timed out: {e}"))
    } else if e.is_connect() {
        StoreError::Transport(format!("cannot connect: {e}"))
    } else {
        StoreError::Transport(e.to_string())
    }
}

#[async_trait::async_trait]
impl ContentStore for HttpContentStore {
    async fn fetch(
        &self,
        endpoint: &str,
        content_address: &str,
    ) -> Result<WirePayload, StoreError> {
        let url = fetch_url(endpoint, content_address);
        tracing::debug!(%url, "Fetching payload");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(content_address.to_string()));
        }
        let body = Self::read_body(response).await?;
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn submit(
        &self,
        endpoint: &str,
        payload: &WirePayload,
    ) -> Result<SubmitResponse, StoreError> {
        tracing::debug!(%endpoint, "Submitting payload");

        let response = self
            .client
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;
        let status = response.status();
        let body = String::from_utf8_lossy(&Self::read_body(response).await?).into_owned();

        if status.is_client_error() {
            return Err(StoreError::Rejected {
                reason: format!("{}: {}", status.as_u16(), body),
            });
        }
        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(SubmitResponse {
            status: status.as_u16(),
            body,
        })
    }
}
