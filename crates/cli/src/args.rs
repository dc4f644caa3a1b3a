//! Command-line arguments.
//!
//! Flag names keep their underscore spelling (`--workspace_name`,
//! `--run_sync`) so existing pipeline definitions keep working.

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};
use spark_jobs::{Operation, OperationRequest, SynapseEndpoint, WaitPolicy, WorkspaceName};

#[derive(Debug, Parser)]
#[command(
    name = "synapse-spark",
    version,
    about = "Run Azure Synapse Spark job definitions with a service principal",
    after_help = "Credentials are read from TENANT_ID, SPN_ID and SPN_SECRET."
)]
pub struct Args {
    /// Synapse workspace name (the `abc` in https://abc.dev.azuresynapse.net).
    #[arg(long = "workspace_name", default_value = "<your-workspace-name>")]
    pub workspace_name: String,

    /// Operation to perform. Only `execute_spark_job` does anything.
    #[arg(long, default_value = "")]
    pub operation: String,

    /// Name of the Spark job definition to execute.
    #[arg(long, default_value = "")]
    pub sparkjobdef: String,

    /// Wait for the job to finish before exiting.
    #[arg(
        long = "run_sync",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub run_sync: bool,

    /// Seconds between status polls when waiting.
    #[arg(long = "poll_interval", default_value_t = 30)]
    pub poll_interval: u64,

    /// Seconds of accumulated waiting after which polling gives up.
    #[arg(long, default_value_t = 3600)]
    pub timeout: u64,
}

impl Args {
    pub fn endpoint(&self) -> Result<SynapseEndpoint> {
        let workspace = WorkspaceName::new(self.workspace_name.as_str())
            .ok_or_else(|| anyhow!("--workspace_name must not be empty"))?;
        Ok(SynapseEndpoint::for_workspace(&workspace))
    }

    pub fn wait_policy(&self) -> Result<WaitPolicy> {
        WaitPolicy::new(
            Duration::from_secs(self.poll_interval),
            Duration::from_secs(self.timeout),
        )
        .ok_or_else(|| anyhow!("--poll_interval must be greater than zero"))
    }

    /// The wait flags are only validated when a synchronous execute will
    /// poll; otherwise the default policy is carried unused.
    pub fn operation_request(&self) -> Result<OperationRequest> {
        let operation = Operation::parse(&self.operation);
        let wait_policy = if self.run_sync && operation == Operation::ExecuteSparkJob {
            self.wait_policy()?
        } else {
            WaitPolicy::default()
        };

        Ok(OperationRequest {
            operation,
            job_definition: self.sparkjobdef.clone(),
            run_sync: self.run_sync,
            wait_policy,
        })
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
