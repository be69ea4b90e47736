use tracing::{debug, warn};

use crate::github::{ApiError, GitHubApi, RepoId, TransientKind};
use crate::models::LocatorResult;

/// File name every Noir package manifest carries.
pub const MANIFEST_FILENAME: &str = "Nargo.toml";

const SEARCH_PAGE_SIZE: u32 = 100;

/// Code-search query that lists every manifest inside one repository.
pub fn manifest_query(repo: &RepoId) -> String {
    format!("filename:{} repo:{}", MANIFEST_FILENAME, repo)
}

/// Ask code search where the manifests of `repo` live.
///
/// Never fails: a broken search comes back as a [`LocatorResult`] with
/// `search_failed` set and a short reason.
pub async fn locate(api: &dyn GitHubApi, repo: &RepoId, credential: &str) -> LocatorResult {
    let query = manifest_query(repo);

    match api.search_code(&query, 1, SEARCH_PAGE_SIZE, credential).await {
        Ok(page) => {
            let mut paths: Vec<String> = Vec::new();
            for hit in page.items {
                if !is_manifest_path(&hit.path) {
                    debug!(repo = %repo, path = %hit.path, "dropping non-manifest search hit");
                } else if paths.contains(&hit.path) {
                    debug!(repo = %repo, path = %hit.path, "dropping duplicate search hit");
                } else {
                    paths.push(hit.path);
                }
            }
            debug!(repo = %repo, found = paths.len(), "manifest search finished");
            LocatorResult::found(paths)
        }
        Err(err) => {
            let reason = failure_reason(&err);
            warn!(repo = %repo, %reason, "manifest search failed");
            LocatorResult::failed(reason)
        }
    }
}

fn is_manifest_path(path: &str) -> bool {
    path.rsplit('/').next() == Some(MANIFEST_FILENAME)
}

/// Short categorical label for a failed search.
pub fn failure_reason(err: &ApiError) -> String {
    match err {
        ApiError::Transient(TransientKind::RateLimited) => "rate-limit-exceeded".to_string(),
        ApiError::Transient(TransientKind::Timeout) => "request-timeout".to_string(),
        ApiError::Transient(TransientKind::Unauthenticated) => "authentication-failed".to_string(),
        ApiError::NotFound => err.to_string(),
        ApiError::Other(message) => message.clone(),
    }
}
