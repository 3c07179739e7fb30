//! HM-CLI: command-line client for hashmap payloads
//!
//! Builds, verifies and exchanges signed payloads with a content store over HTTP.

use anyhow::Context;
use clap::Parser;
use tracing::Instrument;

use hm_cli::{run, Args};
use hm_payload::{Payload, PayloadConfig};
use hm_telemetry::{init_telemetry, payload_span, TelemetryConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut telemetry = TelemetryConfig::for_service("hm-cli");
    if args.verbose {
        telemetry = telemetry.with_log_level("debug");
    }
    telemetry.json_logs |= args.json_logs;
    init_telemetry(&telemetry)?;

    let config = PayloadConfig::from_env().context("invalid HASHMAP_* configuration")?;
    let mut payload = Payload::http(config)?;

    let span = payload_span!("command", name = args.command.name());
    let output = run(&mut payload, args.command, args.endpoint.as_deref())
        .instrument(span)
        .await?;

    println!("{output}");
    Ok(())
}
