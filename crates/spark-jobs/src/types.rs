//! Shared value types for the Synapse Spark job domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! wire semantics: the Livy result and state enumerations, the parsed session
//! status, the outcome of a submission, and the bearer token used to make it.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{LivyJobId, SparkPoolName, WorkspaceName};

// ---------------------------------------------------------------------------
// Endpoint
// ---------------------------------------------------------------------------

/// DNS suffix of the Synapse development endpoint.
pub const SYNAPSE_DEV_SUFFIX: &str = "dev.azuresynapse.net";

/// Base URL of a Synapse workspace development endpoint, without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynapseEndpoint(String);

impl SynapseEndpoint {
    /// Builds `https://{workspace}.dev.azuresynapse.net`.
    pub fn for_workspace(workspace: &WorkspaceName) -> Self {
        Self(format!("https://{}.{}", workspace.as_str(), SYNAPSE_DEV_SUFFIX))
    }

    /// Wraps an arbitrary base URL (used for sovereign clouds and tests).
    ///
    /// Returns `None` if `url` is empty once trailing slashes are removed.
    pub fn from_url(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        let trimmed = url.trim_end_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SynapseEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Livy enumerations
// ---------------------------------------------------------------------------

/// Terminal classification of a Spark workload as reported by Livy.
///
/// Anything other than [`SessionResult::Uncertain`] means the workload has
/// stopped. Values Synapse may add later decode as [`SessionResult::Unknown`]
/// and are treated as terminal as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionResult {
    Cancelled,
    Failed,
    Succeeded,
    /// Still running (or not yet classified).
    Uncertain,
    #[serde(other)]
    Unknown,
}

impl SessionResult {
    /// Returns `true` for every value except [`SessionResult::Uncertain`].
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionResult::Uncertain)
    }
}

impl std::fmt::Display for SessionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SessionResult::Cancelled => "Cancelled",
            SessionResult::Failed => "Failed",
            SessionResult::Succeeded => "Succeeded",
            SessionResult::Uncertain => "Uncertain",
            SessionResult::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Livy session lifecycle state. Reported for logging only; never branched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivyState {
    Busy,
    Dead,
    Error,
    Idle,
    Killed,
    NotStarted,
    Recovering,
    Running,
    ShuttingDown,
    Starting,
    Success,
    #[serde(other)]
    Unknown,
}

// ---------------------------------------------------------------------------
// Session status
// ---------------------------------------------------------------------------

/// Parsed body of a detailed Livy session status response.
///
/// Only `result` is required; the remaining fields are carried for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub result: SessionResult,

    #[serde(default)]
    pub state: Option<LivyState>,

    #[serde(default)]
    pub name: Option<String>,

    /// YARN application id, once the job has been scheduled.
    #[serde(default)]
    pub app_id: Option<String>,
}

impl SessionStatus {
    /// Creates a status with only the result populated.
    pub fn with_result(result: SessionResult) -> Self {
        Self {
            result,
            state: None,
            name: None,
            app_id: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Identity of a submitted job as returned by the execute call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobSubmission {
    pub job_id: LivyJobId,
    pub pool: SparkPoolName,
}

impl JobSubmission {
    /// Returns the `(job id, pool name)` pair as plain strings.
    pub fn as_pair(&self) -> (&str, &str) {
        (self.job_id.as_str(), self.pool.as_str())
    }
}

/// How a completion wait ended.
///
/// A timeout is not an error: the job may still be running remotely. Callers
/// decide whether to treat it as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    /// A terminal result was observed.
    Completed(SessionStatus),
    /// The accumulated sleep time exceeded the timeout before a terminal
    /// result was seen. Carries the last status fetched.
    TimedOut { last_status: SessionStatus },
}

impl WaitOutcome {
    /// Returns the most recent status regardless of how the wait ended.
    pub fn status(&self) -> &SessionStatus {
        match self {
            WaitOutcome::Completed(status) => status,
            WaitOutcome::TimedOut { last_status } => last_status,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self, WaitOutcome::TimedOut { .. })
    }
}

/// Result of the execute operation: the submitted job and, for synchronous
/// runs, how waiting for it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub submission: JobSubmission,
    pub wait: Option<WaitOutcome>,
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// An opaque bearer token.
///
/// The token text never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    expires_on: Option<Timestamp>,
}

impl AccessToken {
    pub fn new(secret: impl Into<String>, expires_on: Option<Timestamp>) -> Self {
        Self {
            secret: secret.into(),
            expires_on,
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Expiry reported by the identity provider, if any. Informational only.
    pub fn expires_on(&self) -> Option<Timestamp> {
        self.expires_on
    }

    /// Returns the value for an `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from seconds since the Unix epoch.
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_unix_seconds(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
