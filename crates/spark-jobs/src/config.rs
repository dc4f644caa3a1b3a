//! Process configuration: service principal credentials, API versions and
//! the completion-wait policy.
//!
//! Credentials are read from the environment once and then passed around as
//! an immutable value. Nothing in this crate reads the environment after
//! [`Credentials::from_env`] returns.

use std::time::Duration;

use crate::{ClientId, SparkJobError, TenantId};

/// Environment variable holding the Azure AD tenant id.
pub const TENANT_ID_VAR: &str = "TENANT_ID";
/// Environment variable holding the service principal's client id.
pub const SPN_ID_VAR: &str = "SPN_ID";
/// Environment variable holding the service principal's client secret.
pub const SPN_SECRET_VAR: &str = "SPN_SECRET";

/// Required variables, in the order they are reported when missing.
pub const REQUIRED_ENV_VARS: [&str; 3] = [TENANT_ID_VAR, SPN_ID_VAR, SPN_SECRET_VAR];

/// Resource the Synapse development endpoint accepts tokens for.
pub const SYNAPSE_RESOURCE: &str = "https://dev.azuresynapse.net/";

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Service principal credentials for the client-credentials grant.
///
/// The secret never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    tenant_id: TenantId,
    client_id: ClientId,
    client_secret: String,
}

impl Credentials {
    pub fn new(tenant_id: TenantId, client_id: ClientId, client_secret: impl Into<String>) -> Self {
        Self {
            tenant_id,
            client_id,
            client_secret: client_secret.into(),
        }
    }

    /// Reads `TENANT_ID`, `SPN_ID` and `SPN_SECRET` from the process environment.
    pub fn from_env() -> Result<Self, SparkJobError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds credentials from an arbitrary variable lookup.
    ///
    /// A variable that is absent or empty counts as missing. All missing
    /// names are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SparkJobError>
    where
        F: Fn(&str) -> Option<String>,
    {
        check_required_vars(&lookup)?;

        let value = |name: &str| lookup(name).unwrap_or_default();
        let missing = |name: &str| SparkJobError::Configuration {
            missing: vec![name.to_string()],
        };

        let tenant_id = TenantId::new(value(TENANT_ID_VAR)).ok_or_else(|| missing(TENANT_ID_VAR))?;
        let client_id = ClientId::new(value(SPN_ID_VAR)).ok_or_else(|| missing(SPN_ID_VAR))?;
        let client_secret = value(SPN_SECRET_VAR);

        Ok(Self {
            tenant_id,
            client_id,
            client_secret,
        })
    }

    pub fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Fails with [`SparkJobError::Configuration`] naming every required
/// variable that `lookup` reports as absent or empty.
pub fn check_required_vars<F>(lookup: F) -> Result<(), SparkJobError>
where
    F: Fn(&str) -> Option<String>,
{
    let missing: Vec<String> = REQUIRED_ENV_VARS
        .into_iter()
        .filter(|&name| lookup(name).map_or(true, |v| v.is_empty()))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SparkJobError::Configuration { missing })
    }
}

// ---------------------------------------------------------------------------
// API versions
// ---------------------------------------------------------------------------

/// `api-version` used for job definition execution.
pub const DEFAULT_JOB_DEFINITION_API_VERSION: &str = "2020-12-01";
/// Livy API version used for session status.
pub const DEFAULT_LIVY_API_VERSION: &str = "2022-02-22-preview";

/// API versions for the two Synapse surfaces this tool talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiVersions {
    pub job_definition: String,
    pub livy: String,
}

impl Default for ApiVersions {
    fn default() -> Self {
        Self {
            job_definition: DEFAULT_JOB_DEFINITION_API_VERSION.to_string(),
            livy: DEFAULT_LIVY_API_VERSION.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wait policy
// ---------------------------------------------------------------------------

/// Default interval between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
/// Default upper bound on accumulated sleep time.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(3600);

/// Polling parameters for [`crate::wait_for_completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub poll_interval: Duration,
    /// Polling stops once accumulated sleep time is strictly greater than this.
    pub timeout: Duration,
}

impl WaitPolicy {
    /// Creates a policy, returning `None` if `poll_interval` is zero.
    #[must_use]
    pub fn new(poll_interval: Duration, timeout: Duration) -> Option<Self> {
        if poll_interval.is_zero() {
            None
        } else {
            Some(Self {
                poll_interval,
                timeout,
            })
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
