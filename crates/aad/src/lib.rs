//! Azure AD client-credentials token provider.
//!
//! Implements the [`spark_jobs::TokenProvider`] trait against the Azure AD v1
//! token endpoint (`{authority}/oauth2/token`), the flow a service principal
//! uses to obtain a token for the Synapse development endpoint.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, form encoding and response parsing live
//! here. The `spark-jobs` crate sees only [`spark_jobs::TokenProvider`] and
//! [`spark_jobs::AccessToken`].
//!
//! Tokens are never cached; every [`TokenProvider::acquire_token`] call is a
//! fresh round trip.

use async_trait::async_trait;
use serde::Deserialize;
use spark_jobs::{AccessToken, Credentials, SparkJobError, Timestamp, TokenProvider};
use tracing::{debug, instrument};

/// Authority host used by the public Azure cloud.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.windows.net";

/// Exchanges service principal credentials for bearer tokens.
pub struct ClientCredentialsTokenProvider {
    http: reqwest::Client,
    credentials: Credentials,
    authority_host: String,
}

impl ClientCredentialsTokenProvider {
    /// Creates a provider against the public cloud authority.
    pub fn new(http: reqwest::Client, credentials: Credentials) -> Self {
        Self {
            http,
            credentials,
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
        }
    }

    /// Overrides the authority host (sovereign clouds, local test servers).
    pub fn with_authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = host.into().trim_end_matches('/').to_string();
        self
    }

    /// `{authority_host}/{tenant_id}`.
    pub fn authority(&self) -> String {
        format!("{}/{}", self.authority_host, self.credentials.tenant_id())
    }

    /// `{authority}/oauth2/token`.
    pub fn token_url(&self) -> String {
        format!("{}/oauth2/token", self.authority())
    }
}

#[async_trait]
impl TokenProvider for ClientCredentialsTokenProvider {
    #[instrument(skip(self), fields(tenant_id = %self.credentials.tenant_id()))]
    async fn acquire_token(&self, resource: &str) -> Result<AccessToken, SparkJobError> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id().as_str()),
            ("client_secret", self.credentials.client_secret()),
            ("resource", resource),
        ];

        let response = self
            .http
            .post(self.token_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| SparkJobError::Authentication {
                message: format!("token request to {} failed: {e}", self.authority()),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SparkJobError::Authentication {
                message: format!("reading token response failed: {e}"),
            })?;
        debug!(status = status.as_u16(), "Token endpoint responded");

        let token = parse_token_response(status.is_success(), &body)?;
        debug!(expires_on = ?token.expires_on(), "Acquired access token");
        Ok(token)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Azure AD v1 sends numeric fields as strings; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    String(String),
}

impl NumberOrString {
    fn as_i64(&self) -> Option<i64> {
        match self {
            NumberOrString::Number(n) => Some(*n),
            NumberOrString::String(s) => s.parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_on: Option<NumberOrString>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Turns a token endpoint response into an [`AccessToken`].
///
/// Any non-success status, `error` field, or missing `access_token` is an
/// [`SparkJobError::Authentication`].
fn parse_token_response(success: bool, body: &str) -> Result<AccessToken, SparkJobError> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| SparkJobError::Authentication {
            message: format!("unreadable token response ({e}): {body}"),
        })?;

    if !success || parsed.error.is_some() {
        let message = match (parsed.error, parsed.error_description) {
            (Some(code), Some(description)) => format!("{code}: {description}"),
            (Some(code), None) => code,
            (None, Some(description)) => description,
            (None, None) => body.to_string(),
        };
        return Err(SparkJobError::Authentication { message });
    }

    let secret = parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| SparkJobError::Authentication {
            message: "token response did not contain an access_token".to_string(),
        })?;
    let expires_on = parsed
        .expires_on
        .as_ref()
        .and_then(NumberOrString::as_i64)
        .and_then(Timestamp::from_unix_seconds);

    Ok(AccessToken::new(secret, expires_on))
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
