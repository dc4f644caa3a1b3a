//! Completion polling for a submitted Livy job.

use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::{LivyJobId, SparkJobApi, SparkJobError, SparkPoolName, WaitOutcome, WaitPolicy};

/// Polls the job status until its result leaves `Uncertain` or the
/// accumulated sleep time exceeds `policy.timeout`.
///
/// Each iteration fetches the status once. A non-`Uncertain` result returns
/// [`WaitOutcome::Completed`] immediately. Otherwise the task sleeps for
/// `policy.poll_interval`; if the total slept time is now strictly greater
/// than the timeout, [`WaitOutcome::TimedOut`] is returned without a further
/// fetch.
///
/// Sleep time is accumulated from the configured interval, not measured, so
/// the time spent in status calls does not count towards the timeout.
///
/// # Errors
///
/// Any error from [`SparkJobApi::session_status`] ends the wait.
#[instrument(skip(api, policy), fields(pool = %pool, job_id = %job_id))]
pub async fn wait_for_completion<A>(
    api: &A,
    pool: &SparkPoolName,
    job_id: &LivyJobId,
    policy: WaitPolicy,
) -> Result<WaitOutcome, SparkJobError>
where
    A: SparkJobApi + ?Sized,
{
    let mut slept = Duration::ZERO;

    loop {
        let status = api.session_status(pool, job_id).await?;
        if status.is_terminal() {
            info!(result = %status.result, state = ?status.state, "Session reached a terminal result");
            return Ok(WaitOutcome::Completed(status));
        }

        info!(state = ?status.state, "SessionId: {job_id} execution still in progress, sleeping");
        tokio::time::sleep(policy.poll_interval).await;
        slept += policy.poll_interval;

        if slept > policy.timeout {
            warn!(
                timeout_secs = policy.timeout.as_secs(),
                "Gave up waiting for session {job_id}; it may still be running"
            );
            return Ok(WaitOutcome::TimedOut {
                last_status: status,
            });
        }
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
