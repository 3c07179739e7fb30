//! # Adapters Module
//!
//! Content store implementations of the outbound port.

pub mod http;
pub mod memory;

pub use http::HttpContentStore;
pub use memory::MemoryContentStore;
