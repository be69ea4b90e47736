use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::analyzer::analyze;
use super::catalog::fallback_paths;
use super::fetcher::{fetch_manifest, FetchError, FetchOutcome};
use super::locator::locate;
use crate::github::{CredentialSupplier, GitHubApi, RepoId};
use crate::models::{
    ApiFailure, ClassificationResult, ManifestAnalysis, BASELINE_TYPE, CONTRACT_TYPE,
    UNKNOWN_TYPE,
};

/// Classifies repositories as Aztec or plain Noir from their `Nargo.toml` files.
///
/// Holds no per-call state, so one instance can classify many repositories
/// concurrently.
pub struct Classifier {
    api: Arc<dyn GitHubApi>,
    credentials: Arc<dyn CredentialSupplier>,
    pacing: Duration,
}

impl Classifier {
    pub fn new(api: Arc<dyn GitHubApi>, credentials: Arc<dyn CredentialSupplier>) -> Self {
        Self {
            api,
            credentials,
            pacing: Duration::ZERO,
        }
    }

    /// Delay inserted between consecutive manifest fetches of one repository.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Locate, fetch and analyze every candidate manifest of `repo`, then fold
    /// the per-file verdicts into one result.
    ///
    /// Never fails. Search or fetch trouble is reported through
    /// [`ClassificationResult::api_failure`] and the remaining paths are still tried.
    pub async fn classify(&self, repo: &RepoId) -> ClassificationResult {
        let api = self.api.as_ref();
        let located = locate(api, repo, &self.credentials.next_credential()).await;

        let using_fallback = located.search_failed || located.candidate_paths.is_empty();
        let paths_to_try = if using_fallback {
            debug!(
                repo = %repo,
                search_failed = located.search_failed,
                "trying fallback manifest paths"
            );
            fallback_paths()
        } else {
            located.candidate_paths
        };

        let mut result = ClassificationResult::default();
        let mut fallback_fetch_failures = 0usize;

        for (index, path) in paths_to_try.iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            let credential = self.credentials.next_credential();
            match fetch_manifest(api, repo, path, &credential).await {
                Ok(FetchOutcome::Found(manifest)) => {
                    record(&mut result, path, &analyze(&manifest));
                }
                Ok(FetchOutcome::Absent) => {
                    debug!(repo = %repo, %path, "no manifest");
                    if using_fallback {
                        fallback_fetch_failures += 1;
                    }
                }
                Err(err) => {
                    log_fetch_error(repo, &err);
                    if using_fallback {
                        fallback_fetch_failures += 1;
                    }
                }
            }
        }

        if located.search_failed {
            result.api_failure = Some(ApiFailure {
                search_failed: true,
                all_fallback_fetches_failed: fallback_fetch_failures == paths_to_try.len(),
                reason: located.failure_reason.unwrap_or_default(),
            });
        }

        if !result.belongs_to_aztec
            && result.manifests_examined > 0
            && result.primary_declared_type == UNKNOWN_TYPE
        {
            result.primary_declared_type = BASELINE_TYPE.to_string();
        }

        info!(
            repo = %repo,
            aztec = result.belongs_to_aztec,
            kind = %result.primary_declared_type,
            manifests = result.manifests_examined,
            review = result.needs_review(),
            "classified"
        );

        result
    }
}

/// Fold one manifest's verdict into the running result.
///
/// Aztec membership only ever turns on. A `contract` type always wins; any
/// other type is taken only while nothing better is known and the repository
/// has not been marked Aztec.
fn record(result: &mut ClassificationResult, path: &str, analysis: &ManifestAnalysis) {
    result.manifests_examined += 1;
    result.manifest_paths_found.push(path.to_string());

    if analysis.indicates_aztec {
        result.belongs_to_aztec = true;
        result
            .aztec_indicators
            .push(format!("{}: {}", path, analysis.indicators.join(", ")));
    }

    if analysis.declared_type == CONTRACT_TYPE {
        result.primary_declared_type = CONTRACT_TYPE.to_string();
    } else if result.primary_declared_type == UNKNOWN_TYPE && !result.belongs_to_aztec {
        result.primary_declared_type = analysis.declared_type.clone();
    }
}

fn log_fetch_error(repo: &RepoId, err: &FetchError) {
    match err {
        FetchError::Malformed { path, source } => {
            warn!(repo = %repo, %path, error = %source, "malformed manifest, skipping");
        }
        FetchError::Transient { path, kind } => {
            warn!(repo = %repo, %path, %kind, "manifest fetch failed");
        }
        FetchError::Unavailable { path, message } => {
            warn!(repo = %repo, %path, %message, "manifest fetch failed");
        }
    }
}
