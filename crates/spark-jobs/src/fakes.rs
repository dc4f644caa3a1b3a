//! In-memory [`SparkJobApi`] used by the unit tests of this crate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    JobSubmission, LivyJobId, SessionResult, SessionStatus, SparkJobApi, SparkJobDefinitionName,
    SparkJobError, SparkPoolName,
};

/// A recorded call against [`FakeSparkJobApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Execute(String),
    Status { pool: String, job_id: String },
}

/// Replays scripted status results; the last one repeats once the script runs out.
pub struct FakeSparkJobApi {
    submission: JobSubmission,
    results: Mutex<VecDeque<SessionResult>>,
    last: Mutex<SessionResult>,
    calls: Mutex<Vec<Call>>,
}

impl FakeSparkJobApi {
    pub fn new(job_id: &str, pool: &str, results: &[SessionResult]) -> Self {
        Self {
            submission: JobSubmission {
                job_id: LivyJobId::new(job_id).unwrap(),
                pool: SparkPoolName::new(pool).unwrap(),
            },
            results: Mutex::new(results.iter().copied().collect()),
            last: Mutex::new(SessionResult::Uncertain),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Status { .. }))
            .count()
    }
}

#[async_trait]
impl SparkJobApi for FakeSparkJobApi {
    async fn execute_job_definition(
        &self,
        name: &SparkJobDefinitionName,
    ) -> Result<JobSubmission, SparkJobError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Execute(name.as_str().to_string()));
        Ok(self.submission.clone())
    }

    async fn session_status(
        &self,
        pool: &SparkPoolName,
        job_id: &LivyJobId,
    ) -> Result<SessionStatus, SparkJobError> {
        self.calls.lock().unwrap().push(Call::Status {
            pool: pool.as_str().to_string(),
            job_id: job_id.as_str().to_string(),
        });

        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.results.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(SessionStatus::with_result(*last))
    }
}
