//! Port traits implemented by the infrastructure crates.
//!
//! The domain logic in [`crate::waiter`] and [`crate::submitter`] is written
//! against these traits only. `aad` supplies a [`TokenProvider`];
//! `synapse-api` supplies a [`SparkJobApi`]. Tests supply in-memory fakes.

use async_trait::async_trait;

use crate::{
    AccessToken, JobSubmission, LivyJobId, SessionStatus, SparkJobDefinitionName, SparkJobError,
    SparkPoolName,
};

/// Source of bearer tokens for a resource.
///
/// Implementations must not cache: each call performs a fresh exchange.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Acquires a token for `resource` (e.g. `https://dev.azuresynapse.net/`).
    ///
    /// # Errors
    ///
    /// [`SparkJobError::Authentication`] when the identity provider rejects
    /// the exchange or cannot be reached.
    async fn acquire_token(&self, resource: &str) -> Result<AccessToken, SparkJobError>;
}

/// The two Synapse REST calls this tool makes.
///
/// An implementation is bound to one workspace endpoint and authenticates
/// every call independently.
#[async_trait]
pub trait SparkJobApi: Send + Sync {
    /// Starts a run of the named Spark job definition.
    ///
    /// # Errors
    ///
    /// [`SparkJobError::Remote`] on transport failure or when the response
    /// does not carry `id` and `sparkPoolName`.
    async fn execute_job_definition(
        &self,
        name: &SparkJobDefinitionName,
    ) -> Result<JobSubmission, SparkJobError>;

    /// Reads the detailed Livy status of a job.
    ///
    /// # Errors
    ///
    /// [`SparkJobError::Remote`] on transport failure or when the response
    /// body is not a session status.
    async fn session_status(
        &self,
        pool: &SparkPoolName,
        job_id: &LivyJobId,
    ) -> Result<SessionStatus, SparkJobError>;
}
