//! Subcommand execution.
//!
//! Every command returns the text to print on stdout; logging goes to stderr.

use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use hm_payload::{
    content_address, ContentStore, GenerateOptions, Payload, PayloadApi, SubmitResponse,
};

use crate::cli::Command;

/// Run one subcommand against `payload`.
///
/// `endpoint` overrides the configured store URL for `get`/`post`.
pub async fn run<S: ContentStore>(
    payload: &mut Payload<S>,
    command: Command,
    endpoint: Option<&str>,
) -> anyhow::Result<String> {
    match command {
        Command::Generate {
            key,
            message,
            ttl,
            post,
        } => {
            let options = GenerateOptions {
                ttl,
                ..Default::default()
            };
            let mut output = payload
                .generate(&key, message.as_bytes(), options)
                .context("failed to generate payload")?;
            if post {
                let response = payload.post(endpoint).await.context("failed to post payload")?;
                output.push('\n');
                output.push_str(&describe_response(&response));
            }
            Ok(output)
        }
        Command::Validate { file } => {
            let raw = read_input(file.as_deref())?;
            payload.import(&raw).context("payload is not valid")?;
            summarize(payload)
        }
        Command::Get { content_address } => {
            payload
                .get(content_address.as_deref(), endpoint)
                .await
                .context("failed to get payload")?;
            Ok(payload.message()?)
        }
        Command::Post { file } => {
            let raw = read_input(file.as_deref())?;
            payload.import(&raw).context("payload is not valid")?;
            let response = payload.post(endpoint).await.context("failed to post payload")?;
            Ok(describe_response(&response))
        }
    }
}

/// Read wire JSON from a file, or stdin when no path is given.
fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            buf
        }
    };
    Ok(raw.trim().to_string())
}

/// Human-readable summary of the held payload.
fn summarize<S: ContentStore>(payload: &Payload<S>) -> anyhow::Result<String> {
    let envelope = payload.data()?;
    let wire = payload.wire()?;
    let message = match payload.message() {
        Ok(text) => text,
        Err(_) => format!("<{} bytes of binary data>", envelope.message.len()),
    };

    let mut out = String::new();
    writeln!(out, "message:    {message}")?;
    writeln!(out, "timestamp:  {}", envelope.timestamp)?;
    writeln!(out, "ttl:        {}", envelope.ttl)?;
    writeln!(out, "expires at: {}", envelope.expires_at_nanos())?;
    writeln!(out, "sig method: {}", envelope.sig_method)?;
    writeln!(out, "version:    {}", envelope.version)?;
    write!(out, "signer:     {}", content_address(&wire.pubkey))?;
    Ok(out)
}

fn describe_response(response: &SubmitResponse) -> String {
    if response.body.is_empty() {
        format!("posted: {}", response.status)
    } else {
        format!("posted: {} {}", response.status, response.body)
    }
}
