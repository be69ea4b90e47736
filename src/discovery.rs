use futures::future::join_all;
use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::config::DiscoveryConfig;
use crate::github::{CredentialSupplier, GitHubApi, RepoId};
use crate::models::RepoReport;

const PAGE_SIZE: u32 = 100;

/// Enumerate candidate repositories through code search.
///
/// Repositories come back in first-seen order without duplicates. A failing
/// page ends its query but not the run; GitHub caps code search anyway, so
/// discovery is best-effort.
pub async fn discover_repositories(
    api: &dyn GitHubApi,
    credentials: &dyn CredentialSupplier,
    config: &DiscoveryConfig,
) -> Vec<RepoId> {
    let mut repos: Vec<RepoId> = Vec::new();

    for query in &config.queries {
        for page in 1..=config.max_pages {
            let result = api
                .search_code(query, page, PAGE_SIZE, &credentials.next_credential())
                .await;

            let results = match result {
                Ok(results) => results,
                Err(err) => {
                    warn!(%query, page, error = %err, "discovery search failed, moving on");
                    break;
                }
            };

            if page == 1 {
                debug!(
                    %query,
                    total = results.total_count,
                    incomplete = results.incomplete_results,
                    "discovery search"
                );
            }

            let hits = results.items.len();
            for hit in results.items {
                if hit.repository.fork && !config.include_forks {
                    continue;
                }
                match RepoId::parse(&hit.repository.full_name) {
                    Ok(repo) if !repos.contains(&repo) => repos.push(repo),
                    Ok(_) => {}
                    Err(err) => debug!(error = %err, "skipping unparseable repository"),
                }
            }

            if hits < PAGE_SIZE as usize {
                break;
            }
        }
        info!(%query, total = repos.len(), "discovery query done");
    }

    repos
}

/// Explicit repositories first, then discovered ones not already listed.
pub fn merge_targets(explicit: Vec<RepoId>, discovered: Vec<RepoId>) -> Vec<RepoId> {
    let mut targets: Vec<RepoId> = Vec::with_capacity(explicit.len() + discovered.len());
    for repo in explicit.into_iter().chain(discovered) {
        if !targets.contains(&repo) {
            targets.push(repo);
        }
    }
    targets
}

/// Classify `repos` in batches of `concurrency`, keeping input order.
pub async fn classify_all(
    classifier: &Classifier,
    repos: &[RepoId],
    concurrency: usize,
    progress: Option<&ProgressBar>,
) -> Vec<RepoReport> {
    let mut reports = Vec::with_capacity(repos.len());

    for batch in repos.chunks(concurrency.max(1)) {
        let results = join_all(batch.iter().map(|repo| classifier.classify(repo))).await;

        for (repo, classification) in batch.iter().zip(results) {
            reports.push(RepoReport {
                repository: repo.to_string(),
                url: repo.html_url(),
                ecosystem: classification.ecosystem(),
                classification,
            });
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }
    }

    reports
}
