//! Domain logic for running Azure Synapse Spark job definitions.
//!
//! This crate holds every domain concept, newtype identifier and error type,
//! the port traits the infrastructure crates implement, and the two pieces
//! of actual behaviour: submitting a job definition and polling its Livy
//! session until it finishes.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate performs no HTTP itself.
//! [`TokenProvider`] is implemented by `aad`; [`SparkJobApi`] by `synapse-api`.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`SparkPoolName`, `LivyJobId`, etc.) |
//! | [`types`] | Livy enumerations, session status, submission and token values |
//! | [`errors`] | [`SparkJobError`] |
//! | [`config`] | Credentials, API versions, wait policy |
//! | [`ports`] | [`TokenProvider`] and [`SparkJobApi`] |
//! | [`waiter`] | [`wait_for_completion`] |
//! | [`submitter`] | [`execute_spark_job_definition`] |
//! | [`operation`] | `--operation` parsing and [`dispatch`] |

pub mod config;
pub mod errors;
pub mod identifiers;
pub mod operation;
pub mod ports;
pub mod submitter;
pub mod types;
pub mod waiter;

#[cfg(test)]
mod fakes;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{
    check_required_vars, ApiVersions, Credentials, WaitPolicy, REQUIRED_ENV_VARS, SYNAPSE_RESOURCE,
};
pub use errors::{RemoteOperation, SparkJobError};
pub use identifiers::{
    ClientId, LivyJobId, RunId, SparkJobDefinitionName, SparkPoolName, TenantId, WorkspaceName,
};
pub use operation::{dispatch, Operation, OperationRequest, EXECUTE_SPARK_JOB};
pub use ports::{SparkJobApi, TokenProvider};
pub use submitter::execute_spark_job_definition;
pub use types::{
    AccessToken, JobSubmission, LivyState, SessionResult, SessionStatus, SubmissionReport,
    SynapseEndpoint, Timestamp, WaitOutcome,
};
pub use waiter::wait_for_completion;
