use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::github::{ApiError, Contents, GitHubApi, RepoId, TransientKind};
use crate::models::{Manifest, BASELINE_TYPE};

/// Raw shape of a `Nargo.toml`. Both sections are optional.
#[derive(Debug, Deserialize)]
struct NargoToml {
    package: Option<PackageSection>,
    #[serde(default)]
    dependencies: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct PackageSection {
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug)]
pub enum FetchOutcome {
    Found(Manifest),
    /// Nothing at this path, or the path is a directory.
    Absent,
}

/// Why a fetched file could not be read as a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("{0}")]
    Content(String),
    #[error("not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error(transparent)]
    Syntax(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{kind} while fetching {path}")]
    Transient { path: String, kind: TransientKind },
    #[error("malformed manifest at {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: ManifestError,
    },
    #[error("could not fetch {path}: {message}")]
    Unavailable { path: String, message: String },
}

/// Parse manifest text, applying the documented `package.type` default.
pub fn parse_manifest(text: &str) -> Result<Manifest, toml::de::Error> {
    let raw: NargoToml = toml::from_str(text)?;

    let package_type = raw
        .package
        .and_then(|p| p.kind)
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| BASELINE_TYPE.to_string());

    Ok(Manifest {
        package_type,
        dependencies: raw.dependencies,
    })
}

/// Fetch and parse the manifest at exactly `path`. One API call, no retries.
pub async fn fetch_manifest(
    api: &dyn GitHubApi,
    repo: &RepoId,
    path: &str,
    credential: &str,
) -> Result<FetchOutcome, FetchError> {
    let malformed = |source: ManifestError| FetchError::Malformed {
        path: path.to_string(),
        source,
    };

    let bytes = match api.fetch_contents(repo, path, credential).await {
        Ok(Contents::File(bytes)) => bytes,
        Ok(Contents::Corrupt(reason)) => return Err(malformed(ManifestError::Content(reason))),
        Ok(Contents::Directory) | Err(ApiError::NotFound) => return Ok(FetchOutcome::Absent),
        Err(ApiError::Transient(kind)) => {
            return Err(FetchError::Transient {
                path: path.to_string(),
                kind,
            })
        }
        Err(ApiError::Other(message)) => {
            return Err(FetchError::Unavailable {
                path: path.to_string(),
                message,
            })
        }
    };

    let text = String::from_utf8(bytes).map_err(|e| malformed(e.into()))?;

    parse_manifest(&text)
        .map(FetchOutcome::Found)
        .map_err(|e| malformed(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeGitHub;

    #[test]
    fn test_parse_full_manifest() {
        let content = r#"
[package]
name = "token_contract"
type = "contract"
authors = [""]
compiler_version = ">=0.25.0"

[dependencies]
aztec = { git = "https://github.com/AztecProtocol/aztec-packages/", tag = "v0.35.0", directory = "noir-projects/aztec-nr/aztec" }
value_note = { path = "../value_note" }
"#;
        let manifest = parse_manifest(content).unwrap();
        assert_eq!(manifest.package_type, "contract");
        let names: Vec<_> = manifest.dependencies.keys().cloned().collect();
        assert_eq!(names, vec!["aztec", "value_note"]);
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let manifest = parse_manifest("[package]\nname = \"hello\"\n").unwrap();
        assert_eq!(manifest.package_type, "bin");
        assert!(manifest.dependencies.is_empty());

        let empty = parse_manifest("").unwrap();
        assert_eq!(empty.package_type, "bin");
    }

    #[test]
    fn test_parse_workspace_manifest() {
        let manifest = parse_manifest("[workspace]\nmembers = [\"a\", \"b\"]\n").unwrap();
        assert_eq!(manifest.package_type, "bin");
    }

    #[test]
    fn test_parse_rejects_bad_syntax() {
        assert!(parse_manifest("[package\ntype = contract").is_err());
    }

    #[tokio::test]
    async fn test_fetch_outcomes() {
        let repo = RepoId::new("o", "r");
        let api = FakeGitHub::default()
            .file("o/r", "Nargo.toml", "[package]\ntype = \"lib\"\n")
            .file("o/r", "broken/Nargo.toml", "[package\n")
            .directory("o/r", "dir/Nargo.toml")
            .fetch_error("o/r", "slow/Nargo.toml", ApiError::Transient(TransientKind::Timeout))
            .contents("o/r", "latin1/Nargo.toml", Contents::File(vec![0x5b, 0xff, 0xfe, 0x5d]))
            .contents(
                "o/r",
                "garbled/Nargo.toml",
                Contents::Corrupt("invalid base64 content".to_string()),
            );

        match fetch_manifest(&api, &repo, "Nargo.toml", "t").await.unwrap() {
            FetchOutcome::Found(m) => assert_eq!(m.package_type, "lib"),
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(
            fetch_manifest(&api, &repo, "missing/Nargo.toml", "t").await.unwrap(),
            FetchOutcome::Absent
        ));
        assert!(matches!(
            fetch_manifest(&api, &repo, "dir/Nargo.toml", "t").await.unwrap(),
            FetchOutcome::Absent
        ));
        assert!(matches!(
            fetch_manifest(&api, &repo, "broken/Nargo.toml", "t").await,
            Err(FetchError::Malformed {
                source: ManifestError::Syntax(_),
                ..
            })
        ));
        assert!(matches!(
            fetch_manifest(&api, &repo, "latin1/Nargo.toml", "t").await,
            Err(FetchError::Malformed {
                source: ManifestError::Encoding(_),
                ..
            })
        ));
        assert!(matches!(
            fetch_manifest(&api, &repo, "garbled/Nargo.toml", "t").await,
            Err(FetchError::Malformed {
                source: ManifestError::Content(_),
                ..
            })
        ));
        assert!(matches!(
            fetch_manifest(&api, &repo, "slow/Nargo.toml", "t").await,
            Err(FetchError::Transient {
                kind: TransientKind::Timeout,
                ..
            })
        ));
    }
}
