//! HM-CLI: command-line client for hashmap payloads
//!
//! Thin shell over the `hm-payload` façade. Argument parsing lives in `cli`,
//! command execution in `commands`; `main.rs` only wires logging, config and
//! the HTTP store together.
//!
//! ```text
//! hm-cli generate --key $KEY --message hello --post
//! hm-cli validate --file payload.json
//! hm-cli get <content-address> --endpoint https://prototype.hashmap.sh
//! hm-cli post --file payload.json
//! ```

pub mod cli;
pub mod commands;

pub use cli::{Args, Command};
pub use commands::run;
