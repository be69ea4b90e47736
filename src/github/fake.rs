//! In-memory [`GitHubApi`] for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ApiError, CodeHit, CodeSearchPage, Contents, GitHubApi, HitRepository, RepoId};
use crate::classifier::locator::manifest_query;

/// Unknown files answer 404; unknown queries answer an empty page.
#[derive(Default)]
pub struct FakeGitHub {
    searches: HashMap<String, Vec<Result<CodeSearchPage, ApiError>>>,
    files: HashMap<(String, String), Result<Contents, ApiError>>,
    fetched: Mutex<Vec<String>>,
}

pub fn hit(repo: &str, path: &str, fork: bool) -> CodeHit {
    CodeHit {
        path: path.to_string(),
        repository: HitRepository {
            full_name: repo.to_string(),
            fork,
        },
    }
}

pub fn page(items: Vec<CodeHit>) -> CodeSearchPage {
    CodeSearchPage {
        total_count: items.len() as u64,
        incomplete_results: false,
        items,
    }
}

impl FakeGitHub {
    /// Register successive result pages for a raw query.
    pub fn search_pages(
        mut self,
        query: &str,
        pages: Vec<Result<CodeSearchPage, ApiError>>,
    ) -> Self {
        self.searches.insert(query.to_string(), pages);
        self
    }

    /// Manifest search for `repo` returns exactly `paths`.
    pub fn search_paths(self, repo: &str, paths: &[&str]) -> Self {
        let items = paths.iter().map(|p| hit(repo, p, false)).collect();
        let query = manifest_query(&repo_id(repo));
        self.search_pages(&query, vec![Ok(page(items))])
    }

    pub fn search_error(self, repo: &str, err: ApiError) -> Self {
        let query = manifest_query(&repo_id(repo));
        self.search_pages(&query, vec![Err(err)])
    }

    pub fn file(self, repo: &str, path: &str, text: &str) -> Self {
        self.contents(repo, path, Contents::File(text.as_bytes().to_vec()))
    }

    pub fn contents(mut self, repo: &str, path: &str, contents: Contents) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), Ok(contents));
        self
    }

    pub fn directory(mut self, repo: &str, path: &str) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), Ok(Contents::Directory));
        self
    }

    pub fn fetch_error(mut self, repo: &str, path: &str, err: ApiError) -> Self {
        self.files
            .insert((repo.to_string(), path.to_string()), Err(err));
        self
    }

    /// Paths requested through `fetch_contents`, in call order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

fn repo_id(full_name: &str) -> RepoId {
    let (owner, name) = full_name.split_once('/').unwrap();
    RepoId::new(owner, name)
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn search_code(
        &self,
        query: &str,
        page_number: u32,
        _per_page: u32,
        _credential: &str,
    ) -> Result<CodeSearchPage, ApiError> {
        self.searches
            .get(query)
            .and_then(|pages| pages.get(page_number.saturating_sub(1) as usize))
            .cloned()
            .unwrap_or_else(|| Ok(page(Vec::new())))
    }

    async fn fetch_contents(
        &self,
        repo: &RepoId,
        path: &str,
        _credential: &str,
    ) -> Result<Contents, ApiError> {
        self.fetched.lock().unwrap().push(path.to_string());
        self.files
            .get(&(repo.to_string(), path.to_string()))
            .cloned()
            .unwrap_or(Err(ApiError::NotFound))
    }
}
