use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::trace;

use super::{ApiError, CodeSearchPage, Contents, GitHubApi, RepoId, TransientKind};

/// `reqwest`-backed implementation of [`GitHubApi`].
pub struct GitHubClient {
    client: Client,
    api_url: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| ApiError::Other(format!("invalid API url {}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Other(format!("API url cannot be a base: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(
        &self,
        url: Url,
        query: &[(&str, String)],
        credential: &str,
    ) -> Result<reqwest::Response, ApiError> {
        trace!(%url, "GET");

        let response = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .bearer_auth(credential)
            .send()
            .await
            .map_err(categorize_transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();

        Err(categorize_status(status, remaining.as_deref(), &body))
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn search_code(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        credential: &str,
    ) -> Result<CodeSearchPage, ApiError> {
        let url = self.endpoint(["search", "code"])?;
        let params = [
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];

        let response = self.get(url, &params, credential).await?;
        response
            .json::<CodeSearchPage>()
            .await
            .map_err(categorize_transport)
    }

    async fn fetch_contents(
        &self,
        repo: &RepoId,
        path: &str,
        credential: &str,
    ) -> Result<Contents, ApiError> {
        let segments = ["repos", repo.owner.as_str(), repo.name.as_str(), "contents"]
            .into_iter()
            .chain(path.split('/').filter(|s| !s.is_empty()));
        let url = self.endpoint(segments)?;

        let response = self.get(url, &[], credential).await?;
        let data: Value = response.json().await.map_err(categorize_transport)?;
        decode_contents(&data)
    }
}

/// Turn a contents-endpoint payload into [`Contents`].
fn decode_contents(data: &Value) -> Result<Contents, ApiError> {
    if data.is_array() {
        return Ok(Contents::Directory);
    }

    if data.get("type").and_then(|t| t.as_str()) != Some("file") {
        return Ok(Contents::Directory);
    }

    let encoded = data
        .get("content")
        .and_then(|c| c.as_str())
        .unwrap_or_default();

    // GitHub wraps base64 bodies at 60 columns
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    match STANDARD.decode(compact) {
        Ok(bytes) => Ok(Contents::File(bytes)),
        Err(e) => Ok(Contents::Corrupt(format!("invalid base64 content: {e}"))),
    }
}

fn categorize_transport(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Transient(TransientKind::Timeout)
    } else {
        ApiError::Other(err.to_string())
    }
}

/// Map a non-success HTTP status to the closed error set.
pub(crate) fn categorize_status(
    status: StatusCode,
    ratelimit_remaining: Option<&str>,
    body: &str,
) -> ApiError {
    let mentions_rate_limit = body.to_lowercase().contains("rate limit");

    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => ApiError::Transient(TransientKind::RateLimited),
        StatusCode::FORBIDDEN if ratelimit_remaining == Some("0") || mentions_rate_limit => {
            ApiError::Transient(TransientKind::RateLimited)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ApiError::Transient(TransientKind::Unauthenticated)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ApiError::Transient(TransientKind::Timeout)
        }
        other => ApiError::Other(format!("GitHub API returned {other}")),
    }
}
