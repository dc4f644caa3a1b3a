//! Synapse Spark CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments** — see [`args::Args`].
//! 2. **Wire observability** — JSON `tracing` output on stderr plus optional
//!    OTLP export (see [`telemetry`]). Every run gets a [`RunId`] on its root span.
//! 3. **Validate configuration** — `TENANT_ID`, `SPN_ID` and `SPN_SECRET` must
//!    all be set; all missing names are reported together.
//! 4. **Construct infrastructure** — one shared `reqwest::Client`, the Azure AD
//!    token provider and the Synapse client bound to the workspace endpoint.
//! 5. **Dispatch** — `execute_spark_job` submits the job definition (and waits
//!    with `--run_sync true`); any other operation is logged and ignored.
//!
//! Any error ends the process with a non-zero exit code.

mod args;
mod telemetry;

use std::sync::Arc;

use aad::ClientCredentialsTokenProvider;
use anyhow::{Context, Result};
use clap::Parser;
use spark_jobs::{dispatch, Credentials, RunId, SubmissionReport, WaitOutcome};
use synapse_api::SynapseClient;
use tracing::{info_span, Instrument};

use crate::args::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let telemetry = telemetry::init()?;

    let run_id = RunId::new_random();
    let result = run(args).instrument(info_span!("run", %run_id)).await;
    if let Err(e) = &result {
        tracing::error!(error = %e, %run_id, "Run failed");
    }

    telemetry.shutdown();
    result
}

async fn run(args: Args) -> Result<()> {
    let endpoint = args.endpoint()?;
    let request = args.operation_request()?;
    let credentials = Credentials::from_env()?;

    let http = reqwest::Client::builder()
        .build()
        .context("failed to build the HTTP client")?;
    let tokens = Arc::new(ClientCredentialsTokenProvider::new(http.clone(), credentials));
    let api = SynapseClient::new(http, endpoint, tokens);

    if let Some(report) = dispatch(&api, &request).await? {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SubmissionReport) {
    let (job_id, pool) = report.submission.as_pair();
    println!("LivyJob with id {job_id} submitted on Spark Pool {pool}");

    match &report.wait {
        Some(WaitOutcome::Completed(status)) => {
            println!("LivyJob {job_id} finished with result {}", status.result);
        }
        Some(WaitOutcome::TimedOut { last_status }) => {
            println!(
                "LivyJob {job_id} still {} when the wait timed out",
                last_status.result
            );
        }
        None => {}
    }
}
