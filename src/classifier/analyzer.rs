use crate::models::{Manifest, ManifestAnalysis, BASELINE_TYPE, CONTRACT_TYPE};

/// Root name of the Aztec ecosystem as it appears in dependency names
/// (`aztec`, `aztec_std`, `easy_private_state-aztec`, ...).
pub const AZTEC_TOKEN: &str = "aztec";

/// Decide whether a single manifest points at Aztec rather than plain Noir.
///
/// A `contract` package type is conclusive on its own. Otherwise every
/// dependency whose name contains the Aztec token (case-insensitive) is
/// reported as an indicator, in dependency-name order.
pub fn analyze(manifest: &Manifest) -> ManifestAnalysis {
    let declared_type = match manifest.package_type.trim() {
        "" => BASELINE_TYPE.to_string(),
        t => t.to_string(),
    };

    if declared_type == CONTRACT_TYPE {
        return ManifestAnalysis {
            indicates_aztec: true,
            declared_type,
            indicators: vec![format!("type={}", CONTRACT_TYPE)],
        };
    }

    let indicators: Vec<String> = manifest
        .dependencies
        .keys()
        .filter(|name| name.to_lowercase().contains(AZTEC_TOKEN))
        .map(|name| format!("dependency:{}", name))
        .collect();

    ManifestAnalysis {
        indicates_aztec: !indicators.is_empty(),
        declared_type,
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn manifest(kind: &str, deps: &[&str]) -> Manifest {
        let dependencies: BTreeMap<String, toml::Value> = deps
            .iter()
            .map(|d| (d.to_string(), toml::Value::String("1.0".to_string())))
            .collect();
        Manifest {
            package_type: kind.to_string(),
            dependencies,
        }
    }

    #[test]
    fn test_contract_type() {
        let analysis = analyze(&manifest("contract", &[]));
        assert!(analysis.indicates_aztec);
        assert_eq!(analysis.declared_type, "contract");
        assert_eq!(analysis.indicators, vec!["type=contract"]);
    }

    #[test]
    fn test_contract_type_skips_dependency_scan() {
        let analysis = analyze(&manifest("contract", &["aztec"]));
        assert_eq!(analysis.indicators, vec!["type=contract"]);
    }

    #[test]
    fn test_aztec_dependency() {
        let analysis = analyze(&manifest("lib", &["aztec_std", "std_lib"]));
        assert!(analysis.indicates_aztec);
        assert_eq!(analysis.declared_type, "lib");
        assert_eq!(analysis.indicators, vec!["dependency:aztec_std"]);
    }

    #[test]
    fn test_token_match_is_case_insensitive_and_anywhere() {
        let analysis = analyze(&manifest(
            "bin",
            &["Aztec", "value_note-aztec", "my_aztec_utils", "poseidon"],
        ));
        assert!(analysis.indicates_aztec);
        assert_eq!(
            analysis.indicators,
            vec![
                "dependency:Aztec",
                "dependency:my_aztec_utils",
                "dependency:value_note-aztec",
            ]
        );
    }

    #[test]
    fn test_plain_noir_binary() {
        let analysis = analyze(&manifest("bin", &[]));
        assert!(!analysis.indicates_aztec);
        assert_eq!(analysis.declared_type, "bin");
        assert!(analysis.indicators.is_empty());
    }

    #[test]
    fn test_empty_type_defaults_to_bin() {
        let analysis = analyze(&manifest("", &["std"]));
        assert_eq!(analysis.declared_type, "bin");
        assert!(!analysis.indicates_aztec);
    }

    #[test]
    fn test_deterministic() {
        let m = manifest("lib", &["aztec", "easy_private_state_aztec", "x"]);
        assert_eq!(analyze(&m), analyze(&m));
    }
}
