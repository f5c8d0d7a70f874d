use std::env;

use async_trait::async_trait;
use planboard_application::RemoteAssignmentStore;
use planboard_core::{AppError, AppResult, AssignmentId};
use planboard_domain::ResourceAssignment;
use url::Url;

const ENDPOINT_ENV: &str = "PLANBOARD_REMOTE_URL";
const ACCESS_KEY_ENV: &str = "PLANBOARD_REMOTE_KEY";

/// Connection settings for the hosted assignment table.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    /// Base URL of the assignment collection endpoint.
    pub endpoint: Url,
    /// API key, sent both as `apikey` and as the bearer token.
    pub access_key: String,
}

impl RemoteStoreConfig {
    /// Reads the remote configuration from the environment.
    ///
    /// Returns `Ok(None)` when either variable is unset. An unconfigured
    /// remote tier is a supported mode, not an error.
    pub fn from_env() -> AppResult<Option<Self>> {
        let (Ok(endpoint), Ok(access_key)) = (env::var(ENDPOINT_ENV), env::var(ACCESS_KEY_ENV))
        else {
            return Ok(None);
        };

        if endpoint.trim().is_empty() || access_key.trim().is_empty() {
            return Ok(None);
        }

        let endpoint = Url::parse(&endpoint).map_err(|error| {
            AppError::Validation(format!("{ENDPOINT_ENV} is not a valid URL: {error}"))
        })?;

        Ok(Some(Self {
            endpoint,
            access_key,
        }))
    }
}

/// Remote store backed by a PostgREST-style HTTP table endpoint.
///
/// Every failure is reported as [`AppError::RemoteUnavailable`] so the
/// service can demote the tier without inspecting the cause.
pub struct HttpRemoteAssignmentStore {
    http_client: reqwest::Client,
    config: RemoteStoreConfig,
}

impl HttpRemoteAssignmentStore {
    /// Creates a store over the given HTTP client and connection settings.
    #[must_use]
    pub fn new(http_client: reqwest::Client, config: RemoteStoreConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.config.access_key)
            .bearer_auth(&self.config.access_key)
    }

    async fn check_status(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<response body unavailable>".to_owned());
        Err(AppError::RemoteUnavailable(format!(
            "remote store responded with status {status}: {body}"
        )))
    }

    fn transport(error: reqwest::Error) -> AppError {
        AppError::RemoteUnavailable(format!("remote store transport error: {error}"))
    }
}

#[async_trait]
impl RemoteAssignmentStore for HttpRemoteAssignmentStore {
    async fn list_all(&self) -> AppResult<Vec<ResourceAssignment>> {
        let mut url = self.config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "id.asc");

        let response = self
            .authorized(self.http_client.get(url))
            .send()
            .await
            .map_err(Self::transport)?;

        Self::check_status(response)
            .await?
            .json::<Vec<ResourceAssignment>>()
            .await
            .map_err(|error| {
                AppError::RemoteUnavailable(format!(
                    "remote store returned an unreadable listing: {error}"
                ))
            })
    }

    async fn upsert(&self, assignment: &ResourceAssignment) -> AppResult<()> {
        let response = self
            .authorized(self.http_client.post(self.config.endpoint.clone()))
            .header("Prefer", "resolution=merge-duplicates")
            .json(std::slice::from_ref(assignment))
            .send()
            .await
            .map_err(Self::transport)?;

        Self::check_status(response).await.map(|_| ())
    }

    async fn delete(&self, id: AssignmentId) -> AppResult<()> {
        let mut url = self.config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("id", &format!("eq.{id}"));

        let response = self
            .authorized(self.http_client.delete(url))
            .send()
            .await
            .map_err(Self::transport)?;

        Self::check_status(response).await.map(|_| ())
    }
}
