//! GitHub REST transport.
//!
//! Everything HTTP-shaped stops here: status codes, headers and `reqwest`
//! errors are folded into the closed [`ApiError`] set before any caller sees
//! them, so classification logic only ever branches on a handful of kinds.

pub mod client;
pub mod credentials;
#[cfg(test)]
pub mod fake;
pub mod repo;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use client::GitHubClient;
pub use credentials::{CredentialSupplier, TokenPool};
pub use repo::RepoId;

/// Retryable failure categories. Retrying is the transport's business; the
/// classifier treats one occurrence as "this call produced nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientKind {
    RateLimited,
    Unauthenticated,
    Timeout,
}

impl std::fmt::Display for TransientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransientKind::RateLimited => write!(f, "rate-limited"),
            TransientKind::Unauthenticated => write!(f, "unauthenticated"),
            TransientKind::Timeout => write!(f, "timeout"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("resource not found")]
    NotFound,
    #[error("transient failure: {0}")]
    Transient(TransientKind),
    #[error("{0}")]
    Other(String),
}

/// Body of a file fetched through the contents endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// Decoded file bytes. Text decoding is left to the caller.
    File(Vec<u8>),
    /// A file whose payload could not be decoded (bad base64).
    Corrupt(String),
    /// The path exists but is a directory (or a symlink/submodule entry).
    Directory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeSearchPage {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<CodeHit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeHit {
    pub path: String,
    pub repository: HitRepository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HitRepository {
    pub full_name: String,
    #[serde(default)]
    pub fork: bool,
}

/// The two GitHub capabilities the census needs.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// One page of `GET /search/code`.
    async fn search_code(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
        credential: &str,
    ) -> Result<CodeSearchPage, ApiError>;

    /// `GET /repos/{owner}/{repo}/contents/{path}` on the default branch.
    async fn fetch_contents(
        &self,
        repo: &RepoId,
        path: &str,
        credential: &str,
    ) -> Result<Contents, ApiError>;
}
