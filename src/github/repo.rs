use anyhow::{anyhow, Result};
use regex::Regex;
use serde::Serialize;

/// `owner/name` pair identifying a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Accepts `owner/name`, `github.com/owner/name` and full `https://` URLs
    /// with an optional `.git` suffix or trailing slash.
    pub fn parse(input: &str) -> Result<Self> {
        let re = Regex::new(
            r"^(?:(?:https?://)?(?:www\.)?github\.com/)?([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+?)(?:\.git)?/?$",
        )?;

        let caps = re
            .captures(input.trim())
            .ok_or_else(|| anyhow!("not a GitHub repository: {}", input))?;

        Ok(Self::new(&caps[1], &caps[2]))
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
