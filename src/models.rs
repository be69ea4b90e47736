use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Package type assumed when a manifest does not declare one.
pub const BASELINE_TYPE: &str = "bin";
/// Package type that marks an Aztec contract and outranks every other type.
pub const CONTRACT_TYPE: &str = "contract";
/// Sentinel for "no manifest told us anything".
pub const UNKNOWN_TYPE: &str = "unknown";

/// A parsed `Nargo.toml` from one candidate path.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    /// `package.type`, or [`BASELINE_TYPE`] when the field is absent.
    pub package_type: String,
    /// `[dependencies]` keyed by dependency name. Values are kept opaque.
    pub dependencies: BTreeMap<String, toml::Value>,
}

/// Verdict for a single manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestAnalysis {
    pub indicates_aztec: bool,
    pub declared_type: String,
    pub indicators: Vec<String>,
}

/// Outcome of searching a repository for manifest paths.
///
/// `failure_reason` is `Some` exactly when `search_failed` is true; use the
/// constructors to keep it that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorResult {
    pub candidate_paths: Vec<String>,
    pub search_failed: bool,
    pub failure_reason: Option<String>,
}

impl LocatorResult {
    pub fn found(candidate_paths: Vec<String>) -> Self {
        Self {
            candidate_paths,
            search_failed: false,
            failure_reason: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            candidate_paths: Vec::new(),
            search_failed: true,
            failure_reason: Some(reason.into()),
        }
    }
}

/// Diagnosis attached to a classification whose search step failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFailure {
    pub search_failed: bool,
    pub all_fallback_fetches_failed: bool,
    pub reason: String,
}

/// Repository-level verdict folded from every examined manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub belongs_to_aztec: bool,
    pub primary_declared_type: String,
    pub manifests_examined: usize,
    pub aztec_indicators: Vec<String>,
    pub manifest_paths_found: Vec<String>,
    pub api_failure: Option<ApiFailure>,
}

impl Default for ClassificationResult {
    fn default() -> Self {
        Self {
            belongs_to_aztec: false,
            primary_declared_type: UNKNOWN_TYPE.to_string(),
            manifests_examined: 0,
            aztec_indicators: Vec::new(),
            manifest_paths_found: Vec::new(),
            api_failure: None,
        }
    }
}

impl ClassificationResult {
    /// Results produced while the search API was degraded should not be trusted blindly.
    pub fn needs_review(&self) -> bool {
        self.api_failure.is_some()
    }

    pub fn ecosystem(&self) -> Ecosystem {
        if self.belongs_to_aztec {
            Ecosystem::Aztec
        } else if self.manifests_examined > 0 {
            Ecosystem::Noir
        } else {
            Ecosystem::None
        }
    }

    pub fn is_contract(&self) -> bool {
        self.primary_declared_type == CONTRACT_TYPE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Noir,
    Aztec,
    None,
}

impl std::fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ecosystem::Noir => write!(f, "Noir"),
            Ecosystem::Aztec => write!(f, "Aztec"),
            Ecosystem::None => write!(f, "none"),
        }
    }
}

/// One classified repository, as handed to the report renderers.
#[derive(Debug, Clone, Serialize)]
pub struct RepoReport {
    pub repository: String,
    pub url: String,
    pub ecosystem: Ecosystem,
    pub classification: ClassificationResult,
}
