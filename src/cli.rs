use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "noir-census",
    about = "Discover and classify Noir and Aztec repositories on GitHub",
    version
)]
pub struct Cli {
    /// Repositories to classify (`owner/name` or GitHub URL)
    pub repos: Vec<String>,

    /// Enumerate candidate repositories through GitHub code search
    #[arg(long)]
    pub discover: bool,

    /// Code-search query for discovery (repeatable, replaces configured queries)
    #[arg(long = "query", value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Result pages fetched per discovery query
    #[arg(long, value_name = "N")]
    pub max_pages: Option<u32>,

    /// Config file [default: ./.noir-census/config.toml, fallback ~/.config/noir-census/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// GitHub token (repeatable or comma-separated; rotated round-robin)
    #[arg(long = "token", env = "GITHUB_TOKEN", value_delimiter = ',', hide_env_values = true)]
    pub tokens: Vec<String>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Write the json/migration report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Exit with code 1 if any repository needs manual review
    #[arg(long)]
    pub fail_on_review: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors and the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Migration,
}
