//! Payload client configuration with validation.

use crate::domain::entities::{DEFAULT_TTL_SECS, MAX_TTL_SECS};
use crate::domain::errors::PayloadError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Per-instance configuration of a payload client.
///
/// Endpoint and content address are defaults; `get`/`post` accept per-call
/// overrides that do not modify the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    /// Base URL of the content store
    pub endpoint: Option<String>,
    /// Store-assigned address of the payload to fetch
    pub content_address: Option<String>,
    /// TTL used when `generate` is called without one
    pub default_ttl: u64,
    /// Whole-request timeout for store calls
    pub request_timeout_secs: u64,
    /// Connect timeout for store calls
    pub connect_timeout_secs: u64,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            content_address: None,
            default_ttl: DEFAULT_TTL_SECS,
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid default TTL {0}s (must be between 1 and {max}s)", max = MAX_TTL_SECS)]
    InvalidTtl(u64),

    #[error("Invalid timeout: {0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("Invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

impl PayloadConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `HASHMAP_ENDPOINT`: Content store base URL
    /// - `HASHMAP_CONTENT_ADDRESS`: Address to fetch
    /// - `HASHMAP_TTL`: Default TTL in seconds (default: 86400)
    /// - `HASHMAP_REQUEST_TIMEOUT`: Request timeout in seconds (default: 10)
    /// - `HASHMAP_CONNECT_TIMEOUT`: Connect timeout in seconds (default: 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            endpoint: non_empty_var("HASHMAP_ENDPOINT"),
            content_address: non_empty_var("HASHMAP_CONTENT_ADDRESS"),
            default_ttl: parse_var("HASHMAP_TTL", defaults.default_ttl)?,
            request_timeout_secs: parse_var(
                "HASHMAP_REQUEST_TIMEOUT",
                defaults.request_timeout_secs,
            )?,
            connect_timeout_secs: parse_var(
                "HASHMAP_CONNECT_TIMEOUT",
                defaults.connect_timeout_secs,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_content_address(mut self, content_address: impl Into<String>) -> Self {
        self.content_address = Some(content_address.into());
        self
    }

    pub fn with_default_ttl(mut self, ttl: u64) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_ttl == 0 || self.default_ttl > MAX_TTL_SECS {
            return Err(ConfigError::InvalidTtl(self.default_ttl));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("request_timeout_secs"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("connect_timeout_secs"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Per-call endpoint if given, else the configured one.
    pub fn resolve_endpoint<'a>(&'a self, endpoint: Option<&'a str>) -> Result<&'a str, PayloadError> {
        endpoint
            .or(self.endpoint.as_deref())
            .filter(|e| !e.is_empty())
            .ok_or(PayloadError::MissingConfiguration("endpoint"))
    }

    /// Per-call content address if given, else the configured one.
    pub fn resolve_content_address<'a>(
        &'a self,
        content_address: Option<&'a str>,
    ) -> Result<&'a str, PayloadError> {
        content_address
            .or(self.content_address.as_deref())
            .filter(|a| !a.is_empty())
            .ok_or(PayloadError::MissingConfiguration("content address"))
    }
}

fn non_empty_var(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(default),
    }
}
