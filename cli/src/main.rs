//! Gradia smoke test - binary entry point.
//!
//! Runs the fixed candidate API scenario against the local backend and prints
//! the report to stdout. Logs go to stderr, filtered by `RUST_LOG`.
//!
//! # Exit Status
//!
//! Fails only when the backend cannot be reached at all. Individual scenario
//! failures are part of the report and still exit successfully.

use std::io::{Write, stderr};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gradia_smoke_scenarios::{ProbeError, RunReport, SmokeConfig, SmokeTest};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stderr keeps diagnostics out of the report on stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(stderr))
        .with(env_filter)
        .init();
}

/// Run the whole sequence against `config`, writing the report to `out`.
async fn run(config: SmokeConfig, out: impl Write) -> Result<ExitCode> {
    let mut smoke = SmokeTest::new(config, out);
    exit_status(smoke.run().await)
}

fn exit_status(result: Result<RunReport, ProbeError>) -> Result<ExitCode> {
    match result {
        Ok(report) => {
            tracing::debug!(?report, "Run report");
            Ok(ExitCode::SUCCESS)
        }
        Err(ProbeError::Unreachable { server_url, source }) => {
            tracing::error!(%server_url, %source, "Backend unreachable");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).context("connectivity probe could not start"),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    init_tracing();
    run(SmokeConfig::default(), std::io::stdout()).await
}
