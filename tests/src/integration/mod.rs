//! Cross-crate integration flows.

pub mod adversarial;
pub mod flows;
