//! `noir-census` — find Noir repositories on GitHub and tell Aztec ones apart.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load config ([`config::load_config`]) and the token pool ([`github::TokenPool`]).
//! 3. Collect targets: explicit repositories plus code-search discovery ([`discovery`]).
//! 4. Classify each repository from its `Nargo.toml` files ([`classifier`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `1` with `--fail-on-review` if any result came from a degraded search.

mod classifier;
mod cli;
mod config;
mod discovery;
mod github;
mod models;
mod report;

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use classifier::Classifier;
use cli::{Cli, ReportFormat};
use config::load_config;
use discovery::{classify_all, discover_repositories, merge_targets};
use github::{GitHubClient, RepoId, TokenPool};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let cwd = std::env::current_dir()?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;
    if !cli.queries.is_empty() {
        config.discovery.queries = cli.queries.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.discovery.max_pages = max_pages;
    }

    let explicit = cli
        .repos
        .iter()
        .map(|r| RepoId::parse(r))
        .collect::<Result<Vec<_>>>()?;

    if explicit.is_empty() && !cli.discover {
        bail!("nothing to classify: pass repositories or --discover");
    }

    let credentials = Arc::new(TokenPool::new(cli.tokens.clone())?);
    info!(tokens = credentials.len(), "token pool ready");

    let api = Arc::new(GitHubClient::new(
        &config.github.api_url,
        config.github.timeout(),
        &config.github.user_agent,
    )?);

    let discovered = if cli.discover {
        discover_repositories(api.as_ref(), credentials.as_ref(), &config.discovery).await
    } else {
        Vec::new()
    };
    let targets = merge_targets(explicit, discovered);
    info!(repositories = targets.len(), "classifying");

    let classifier = Classifier::new(api, credentials).with_pacing(config.github.pacing());

    let pb = if !cli.quiet {
        let pb = ProgressBar::new(targets.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let reports = classify_all(
        &classifier,
        &targets,
        config.discovery.concurrency,
        pb.as_ref(),
    )
    .await;

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&reports, cli.verbose > 0, cli.quiet)?;
        }
        ReportFormat::Json => {
            emit(cli.output.as_deref(), &serde_json::to_string_pretty(&reports)?)?;
        }
        ReportFormat::Migration => {
            emit(
                cli.output.as_deref(),
                &report::migration::render(&reports, &config.migration),
            )?;
        }
    }

    let needs_review = reports.iter().any(|r| r.classification.needs_review());
    if cli.fail_on_review && needs_review {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("noir_census={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print to stdout, or write to `path` when given.
fn emit(path: Option<&std::path::Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{}", content),
    }
    Ok(())
}
