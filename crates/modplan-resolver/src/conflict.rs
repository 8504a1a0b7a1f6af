//! Version-conflict detection across duplicate mod entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::version;

/// How a version conflict should be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    UseNewest,
    UseOldest,
    UseSpecified,
    ExcludeConflicting,
}

/// The same logical mod appearing at more than one version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionConflict {
    /// Lower-cased display name the conflicting entries share.
    pub mod_name: String,
    /// Distinct version strings, in first-seen order.
    pub versions: Vec<String>,
    pub suggested_resolution: ResolutionStrategy,
    /// Set when a strategy has been applied; `use_newest` picks the version
    /// with the greatest numeric-tuple key.
    pub resolved_version: Option<String>,
}

/// Group mods by lower-cased display name and report every group carrying
/// more than one distinct version string.
///
/// Grouping by name rather than id is intentional: it catches the "same"
/// mod appearing twice under different provider entries.
pub fn detect_version_conflicts(graph: &DependencyGraph) -> Vec<VersionConflict> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<String>> = HashMap::new();

    for info in graph.mods() {
        let Some(ref version) = info.version else {
            continue;
        };
        let key = info.name.to_lowercase();
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        if !group.contains(version) {
            group.push(version.clone());
        }
    }

    let mut conflicts = Vec::new();
    for name in order {
        let versions = groups.remove(&name).unwrap_or_default();
        if versions.len() < 2 {
            continue;
        }
        conflicts.push(VersionConflict {
            resolved_version: version::newest(&versions),
            mod_name: name,
            versions,
            suggested_resolution: ResolutionStrategy::UseNewest,
        });
    }
    conflicts
}
