/// Conventional `Nargo.toml` locations, tried in order when code search is
/// unavailable or comes back empty.
pub const FALLBACK_PATHS: &[&str] = &[
    "Nargo.toml",
    "contracts/Nargo.toml",
    "contract/Nargo.toml",
    "src/Nargo.toml",
    "circuits/Nargo.toml",
    "circuit/Nargo.toml",
    "noir/Nargo.toml",
    "aztec/Nargo.toml",
    "contracts/src/Nargo.toml",
    "packages/contracts/Nargo.toml",
    "packages/circuits/Nargo.toml",
    "packages/noir/Nargo.toml",
    "app/Nargo.toml",
    "examples/Nargo.toml",
    "test/Nargo.toml",
];

pub fn fallback_paths() -> Vec<String> {
    FALLBACK_PATHS.iter().map(|p| p.to_string()).collect()
}
