//! HTTP plumbing: authentication headers, error mapping, pagination.

use std::time::Duration;

use serde::de::DeserializeOwned;

use archiver_core::config::DEFAULT_API_URL;
use archiver_core::HostError;

use crate::models::{ApiErrorBody, ApiRepository};
use crate::pagination::next_link;

const PER_PAGE: u32 = 100;
const API_VERSION: &str = "2022-11-28";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Token-authenticated GitHub REST client.
pub struct GitHubClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Point the client at another API root (GitHub Enterprise, test servers).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(concat!("repo-archiver/", env!("CARGO_PKG_VERSION")))
            .build();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        tracing::debug!(%base_url, "creating GitHub client");
        Self {
            agent,
            base_url,
            token: token.into(),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn request(&self, method: &str, url: &str) -> ureq::Request {
        self.agent
            .request(method, url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", API_VERSION)
    }

    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &str,
    ) -> Result<T, HostError> {
        let response = self
            .request("GET", &self.url(path))
            .call()
            .map_err(|e| map_error(e, resource))?;
        decode(response)
    }

    /// `Ok(false)` on 404; other failures are errors.
    pub(crate) fn exists(&self, path: &str, resource: &str) -> Result<bool, HostError> {
        match self.request("GET", &self.url(path)).call() {
            Ok(_) => Ok(true),
            Err(err) => match map_error(err, resource) {
                HostError::NotFound { .. } => Ok(false),
                other => Err(other),
            },
        }
    }

    pub(crate) fn send(
        &self,
        method: &str,
        path: &str,
        resource: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(), HostError> {
        let request = self.request(method, &self.url(path));
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };
        result.map(|_| ()).map_err(|e| map_error(e, resource))
    }

    /// Every repository on every page of a listing endpoint.
    pub(crate) fn list_all(&self, path: &str, resource: &str) -> Result<Vec<ApiRepository>, HostError> {
        let mut next = Some(format!("{}?per_page={PER_PAGE}", self.url(path)));
        let mut all = Vec::new();
        let mut page = 0;
        while let Some(url) = next.take() {
            page += 1;
            tracing::debug!("fetching page {page} of {resource}");
            let response = self
                .request("GET", &url)
                .call()
                .map_err(|e| map_error(e, resource))?;
            next = response.header("link").and_then(next_link);
            let batch: Vec<ApiRepository> = decode(response)?;
            tracing::debug!("retrieved {} repositories on page {page}", batch.len());
            all.extend(batch);
        }
        Ok(all)
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T, HostError> {
    response
        .into_json()
        .map_err(|e| HostError::Decode(e.to_string()))
}

pub(crate) fn map_error(err: ureq::Error, resource: &str) -> HostError {
    match err {
        ureq::Error::Status(404, _) => HostError::not_found(resource),
        ureq::Error::Status(status, response) => {
            let message = response
                .into_json::<ApiErrorBody>()
                .map(|body| body.message)
                .unwrap_or_else(|_| "no error message".to_string());
            HostError::Status { status, message }
        }
        ureq::Error::Transport(transport) => HostError::Transport(transport.to_string()),
    }
}
