//! # Hashmap Telemetry
//!
//! Tracing setup shared by the hashmap tools.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hm_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::for_service("hm-cli"))?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HM_SERVICE_NAME` | `hashmap` | Service name in the startup event |
//! | `HM_LOG_LEVEL` | `info` | Log level filter |
//! | `HM_JSON_LOGS` | `false` | JSON formatted output |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The subscriber could not be installed
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),

    /// The configuration is unusable
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for a tool.
///
/// Rejects an empty service name, then installs the global subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    if config.service_name.trim().is_empty() {
        return Err(TelemetryError::Config("service_name cannot be empty".into()));
    }
    init_tracing(config)
}

/// Convenience macro for creating a span with payload context.
///
/// # Example
///
/// ```rust,ignore
/// use hm_telemetry::payload_span;
///
/// let _span = payload_span!("post", endpoint = %endpoint).entered();
/// ```
#[macro_export]
macro_rules! payload_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
