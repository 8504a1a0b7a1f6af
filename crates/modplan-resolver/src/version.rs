//! Tolerant version ordering for conflict resolution.
//!
//! Modpack version strings are too irregular for strict semver
//! (`1.20.1-forge-47.2.0`, `v5`, `beta-3`), so versions are split on `.`
//! and `-`, only numeric tokens survive, and the resulting integer tuples
//! compare lexicographically. A version with no numeric tokens sorts lowest.
//! This ordering is a compatibility contract; do not replace it with semver.

/// Comparable key for a version string.
pub fn version_key(version: &str) -> Vec<u64> {
    let tokens: Vec<u64> = version
        .split(['.', '-'])
        .filter_map(|token| token.parse().ok())
        .collect();
    if tokens.is_empty() {
        vec![0]
    } else {
        tokens
    }
}

/// Pick the newest of `versions` by numeric-tuple ordering.
///
/// Ties keep the earliest entry, so the result is deterministic for
/// equal-key strings like `1.0-beta` vs `1.0-rc`.
pub fn newest(versions: &[String]) -> Option<String> {
    let mut best: Option<(&String, Vec<u64>)> = None;
    for version in versions {
        let key = version_key(version);
        match best {
            Some((_, ref best_key)) if key <= *best_key => {}
            _ => best = Some((version, key)),
        }
    }
    best.map(|(version, _)| version.clone())
}
