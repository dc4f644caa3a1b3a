//! Error types for the Synapse Spark job domain.
//!
//! [`SparkJobError`] is the single error type crossing the port traits. The
//! adapters (`aad`, `synapse-api`) map their transport failures into it so the
//! domain logic and the CLI never see `reqwest` types.
//!
//! No variant is recovered from locally. Every failure propagates to the
//! process boundary; only job-status polling loops, and that is not error
//! recovery.

use thiserror::Error;

/// Which remote call a [`SparkJobError::Remote`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOperation {
    /// `POST sparkJobDefinitions/{name}/execute`.
    ExecuteJobDefinition,
    /// `GET livyApi/.../sessions/{id}`.
    SessionStatus,
}

impl std::fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteOperation::ExecuteJobDefinition => f.write_str("execute spark job definition"),
            RemoteOperation::SessionStatus => f.write_str("get session status"),
        }
    }
}

/// Errors produced while configuring, authenticating or talking to Synapse.
#[derive(Debug, Error)]
pub enum SparkJobError {
    /// One or more required environment variables are absent or empty.
    ///
    /// `missing` preserves the check order: `TENANT_ID`, `SPN_ID`, `SPN_SECRET`.
    #[error("Required environment variables: {} missing", .missing.join(", "))]
    Configuration {
        /// Names of the missing variables.
        missing: Vec<String>,
    },

    /// The identity provider rejected the client-credentials exchange, or
    /// could not be reached.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Provider error description or transport failure detail.
        message: String,
    },

    /// A Synapse REST call failed at the transport level, or returned a body
    /// that could not be interpreted.
    ///
    /// `status` is `None` when no HTTP response was received.
    #[error("{operation} failed{}: {body}", .status.map(|s| format!(" with HTTP {s}")).unwrap_or_default())]
    Remote {
        operation: RemoteOperation,
        status: Option<u16>,
        /// Raw response body, or the transport error text.
        body: String,
    },

    /// A value that must be non-empty was empty.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl SparkJobError {
    /// Shorthand for a [`SparkJobError::Remote`] without an HTTP status.
    pub fn transport(operation: RemoteOperation, detail: impl std::fmt::Display) -> Self {
        SparkJobError::Remote {
            operation,
            status: None,
            body: detail.to_string(),
        }
    }
}
