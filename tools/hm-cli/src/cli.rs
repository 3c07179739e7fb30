//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// HM-CLI: build, verify and exchange signed hashmap payloads
#[derive(Parser, Debug)]
#[command(name = "hm-cli", version)]
#[command(about = "Build, verify and exchange signed hashmap payloads")]
pub struct Args {
    /// Content store base URL (overrides HASHMAP_ENDPOINT)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit JSON formatted logs on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign a message and print the wire payload
    Generate {
        /// Base64 of the 64-byte secret key material
        #[arg(short, long, env = "HASHMAP_KEY", hide_env_values = true)]
        key: String,

        /// Message text (at most 512 bytes)
        #[arg(short, long)]
        message: String,

        /// Time-to-live in seconds (default: HASHMAP_TTL or 86400)
        #[arg(short, long)]
        ttl: Option<u64>,

        /// Submit the payload to the store after generating it
        #[arg(long)]
        post: bool,
    },

    /// Verify a wire payload and print its envelope
    Validate {
        /// Read the payload from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Fetch a payload by content address, verify it and print its message
    Get {
        /// Store-assigned address (default: HASHMAP_CONTENT_ADDRESS)
        content_address: Option<String>,
    },

    /// Verify a wire payload and submit it to the store
    Post {
        /// Read the payload from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

impl Command {
    /// Subcommand name for log spans.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Generate { .. } => "generate",
            Command::Validate { .. } => "validate",
            Command::Get { .. } => "get",
            Command::Post { .. } => "post",
        }
    }
}
