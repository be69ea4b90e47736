use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.noir-census/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub migration: MigrationConfig,
}

/// Transport settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API root. Override for GitHub Enterprise.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Pause between consecutive manifest fetches of one repository.
    pub pacing_ms: u64,
    pub user_agent: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            timeout_secs: 30,
            pacing_ms: 250,
            user_agent: format!("noir-census/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl GitHubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// How candidate repositories are enumerated.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Code-search queries; every repository with a hit is classified.
    pub queries: Vec<String>,
    /// Pages of 100 results per query. GitHub stops serving after 10.
    pub max_pages: u32,
    pub include_forks: bool,
    /// Repositories classified at once.
    pub concurrency: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            queries: vec!["filename:Nargo.toml".to_string()],
            max_pages: 10,
            include_forks: false,
            concurrency: 4,
        }
    }
}

/// Ecosystem titles used in generated migration commands.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub base_ecosystem: String,
    pub derived_ecosystem: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            base_ecosystem: "Noir Lang".to_string(),
            derived_ecosystem: "Aztec Protocol".to_string(),
        }
    }
}

/// Load configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<cwd>/.noir-census/config.toml`
/// 3. `~/.config/noir-census/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(cwd: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = cwd.join(".noir-census").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("noir-census").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
