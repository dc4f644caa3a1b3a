//! Synapse REST client adapter.
//!
//! Implements the [`spark_jobs::SparkJobApi`] trait over two Synapse
//! development-endpoint surfaces:
//!
//! - `POST {endpoint}/sparkJobDefinitions/{name}/execute?api-version=...`
//!   starts a job definition and returns the Livy batch it created.
//! - `GET {endpoint}/livyApi/versions/{version}/sparkPools/{pool}/sessions/{id}?detailed=True`
//!   reports the detailed status of that batch.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, bearer authentication and response
//! interpretation live here. Every call asks the [`TokenProvider`] for a fresh
//! token; nothing is cached between calls.
//!
//! ## Response handling
//!
//! A body that parses into the expected shape is returned even when the HTTP
//! status is not 2xx. A body that does not parse becomes
//! [`SparkJobError::Remote`] carrying the status code and the raw body.
//! Transport failures become [`SparkJobError::Remote`] with no status.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::Deserialize;
use spark_jobs::{
    ApiVersions, JobSubmission, LivyJobId, RemoteOperation, SessionStatus, SparkJobApi,
    SparkJobDefinitionName, SparkJobError, SparkPoolName, SynapseEndpoint, TokenProvider,
    SYNAPSE_RESOURCE,
};
use tracing::{debug, instrument, warn};

/// Client for one Synapse workspace endpoint.
pub struct SynapseClient {
    http: reqwest::Client,
    endpoint: SynapseEndpoint,
    tokens: Arc<dyn TokenProvider>,
    api_versions: ApiVersions,
    resource: String,
}

impl SynapseClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: SynapseEndpoint,
        tokens: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            http,
            endpoint,
            tokens,
            api_versions: ApiVersions::default(),
            resource: SYNAPSE_RESOURCE.to_string(),
        }
    }

    pub fn with_api_versions(mut self, api_versions: ApiVersions) -> Self {
        self.api_versions = api_versions;
        self
    }

    /// Overrides the resource tokens are requested for.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn endpoint(&self) -> &SynapseEndpoint {
        &self.endpoint
    }

    /// `{endpoint}/sparkJobDefinitions/{name}/execute?api-version={version}`.
    pub fn execute_url(&self, name: &SparkJobDefinitionName) -> Result<Url, SparkJobError> {
        self.build_url(
            &["sparkJobDefinitions", name.as_str(), "execute"],
            ("api-version", self.api_versions.job_definition.as_str()),
        )
    }

    /// `{endpoint}/livyApi/versions/{version}/sparkPools/{pool}/sessions/{id}?detailed=True`.
    pub fn session_status_url(
        &self,
        pool: &SparkPoolName,
        job_id: &LivyJobId,
    ) -> Result<Url, SparkJobError> {
        self.build_url(
            &[
                "livyApi",
                "versions",
                self.api_versions.livy.as_str(),
                "sparkPools",
                pool.as_str(),
                "sessions",
                job_id.as_str(),
            ],
            ("detailed", "True"),
        )
    }

    /// Appends `segments` to the endpoint path. Each segment is percent-encoded,
    /// so a `/`, `?` or `#` inside a name cannot change the route.
    fn build_url(&self, segments: &[&str], query: (&str, &str)) -> Result<Url, SparkJobError> {
        let invalid = |detail: String| SparkJobError::InvalidArgument {
            message: format!("invalid Synapse endpoint {}: {detail}", self.endpoint),
        };

        let mut url = Url::parse(self.endpoint.as_str()).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("not a base URL".to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair(query.0, query.1);
        Ok(url)
    }

    /// Sends an authenticated request and returns `(status, body)`.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: RemoteOperation,
    ) -> Result<(u16, String), SparkJobError> {
        let token = self.tokens.acquire_token(&self.resource).await?;

        let response = request
            .header(AUTHORIZATION, token.bearer_header())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| SparkJobError::transport(operation, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| SparkJobError::Remote {
                operation,
                status: Some(status),
                body: format!("failed to read response body: {e}"),
            })?;
        debug!(status, %operation, "Synapse responded");

        Ok((status, body))
    }
}

#[async_trait]
impl SparkJobApi for SynapseClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn execute_job_definition(
        &self,
        name: &SparkJobDefinitionName,
    ) -> Result<JobSubmission, SparkJobError> {
        let request = self.http.post(self.execute_url(name)?);
        let (status, body) = self
            .send(request, RemoteOperation::ExecuteJobDefinition)
            .await?;
        parse_submission(status, &body)
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn session_status(
        &self,
        pool: &SparkPoolName,
        job_id: &LivyJobId,
    ) -> Result<SessionStatus, SparkJobError> {
        let request = self.http.get(self.session_status_url(pool, job_id)?);
        let (status, body) = self.send(request, RemoteOperation::SessionStatus).await?;
        parse_session_status(status, &body)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Livy batch ids are integers; older previews returned strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JobIdRepr {
    Number(i64),
    String(String),
}

impl JobIdRepr {
    fn into_string(self) -> String {
        match self {
            JobIdRepr::Number(n) => n.to_string(),
            JobIdRepr::String(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResponse {
    id: JobIdRepr,
    spark_pool_name: String,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_submission(status: u16, body: &str) -> Result<JobSubmission, SparkJobError> {
    let remote = || SparkJobError::Remote {
        operation: RemoteOperation::ExecuteJobDefinition,
        status: Some(status),
        body: body.to_string(),
    };

    let parsed: ExecuteResponse = serde_json::from_str(body).map_err(|_| remote())?;
    let job_id = LivyJobId::new(parsed.id.into_string()).ok_or_else(remote)?;
    let pool = SparkPoolName::new(parsed.spark_pool_name).ok_or_else(remote)?;

    if !is_success(status) {
        warn!(status, "Execute call returned a job despite a non-success status");
    }
    Ok(JobSubmission { job_id, pool })
}

fn parse_session_status(status: u16, body: &str) -> Result<SessionStatus, SparkJobError> {
    let parsed: SessionStatus =
        serde_json::from_str(body).map_err(|_| SparkJobError::Remote {
            operation: RemoteOperation::SessionStatus,
            status: Some(status),
            body: body.to_string(),
        })?;

    if !is_success(status) {
        warn!(status, "Session status returned despite a non-success status");
    }
    Ok(parsed)
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
