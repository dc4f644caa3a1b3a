//! Mapping of the `--operation` value onto domain calls.

use tracing::warn;

use crate::{
    execute_spark_job_definition, SparkJobApi, SparkJobDefinitionName, SparkJobError,
    SubmissionReport, WaitPolicy,
};

/// Operation name that runs a Spark job definition.
pub const EXECUTE_SPARK_JOB: &str = "execute_spark_job";

/// A requested operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `execute_spark_job`.
    ExecuteSparkJob,
    /// Any other value, including the empty string. Ignored.
    Unsupported(String),
}

impl Operation {
    pub fn parse(value: &str) -> Self {
        match value {
            EXECUTE_SPARK_JOB => Operation::ExecuteSparkJob,
            other => Operation::Unsupported(other.to_string()),
        }
    }
}

/// Everything needed to run one operation against a workspace.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    pub operation: Operation,
    /// Raw `--sparkjobdef` value; only checked when the operation needs it.
    pub job_definition: String,
    pub run_sync: bool,
    pub wait_policy: WaitPolicy,
}

/// Runs `request` against `api`.
///
/// Returns `Ok(None)` without touching `api` for an unsupported operation.
///
/// # Errors
///
/// [`SparkJobError::InvalidArgument`] if the job definition name is empty,
/// otherwise anything the submission returns.
pub async fn dispatch<A>(
    api: &A,
    request: &OperationRequest,
) -> Result<Option<SubmissionReport>, SparkJobError>
where
    A: SparkJobApi + ?Sized,
{
    match &request.operation {
        Operation::ExecuteSparkJob => {
            let name = SparkJobDefinitionName::new(request.job_definition.as_str()).ok_or_else(
                || SparkJobError::InvalidArgument {
                    message: "a Spark job definition name is required for execute_spark_job"
                        .to_string(),
                },
            )?;
            let report =
                execute_spark_job_definition(api, &name, request.run_sync, request.wait_policy)
                    .await?;
            Ok(Some(report))
        }
        Operation::Unsupported(value) => {
            warn!(operation = %value, "Unsupported operation; nothing to do");
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
