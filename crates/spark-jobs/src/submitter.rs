//! Spark job definition execution.

use tracing::{info, instrument};

use crate::{
    wait_for_completion, SparkJobApi, SparkJobDefinitionName, SparkJobError, SubmissionReport,
    WaitPolicy,
};

/// Starts the named Spark job definition and, if `run_sync` is set, waits
/// for it to finish.
///
/// The returned report always carries the job id and pool name. `wait` is
/// `Some` exactly when `run_sync` was requested.
///
/// # Errors
///
/// Propagates any [`SparkJobError`] from the submission or from polling.
#[instrument(skip(api, policy), fields(job_definition = %name))]
pub async fn execute_spark_job_definition<A>(
    api: &A,
    name: &SparkJobDefinitionName,
    run_sync: bool,
    policy: WaitPolicy,
) -> Result<SubmissionReport, SparkJobError>
where
    A: SparkJobApi + ?Sized,
{
    let submission = api.execute_job_definition(name).await?;
    info!(
        job_id = %submission.job_id,
        pool = %submission.pool,
        "LivyJob with id {} submitted on Spark Pool {}",
        submission.job_id,
        submission.pool
    );

    let wait = if run_sync {
        Some(wait_for_completion(api, &submission.pool, &submission.job_id, policy).await?)
    } else {
        None
    };

    Ok(SubmissionReport { submission, wait })
}

#[cfg(test)]
#[path = "submitter_tests.rs"]
mod tests;
