//! Loader, incompatibility, and namespace conflict detection.

use std::collections::{BTreeMap, HashMap};

use modplan_core::conflict::{Conflict, ConflictType, LoadOrderEntry, Severity};
use modplan_core::loader::ModMetadata;
use modplan_core::record::ModRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loader;
use crate::tables::DetectorTables;

/// Number of conflicts per severity level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn tally(conflicts: &[Conflict]) -> Self {
        let mut counts = Self::default();
        for conflict in conflicts {
            match conflict.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }
}

/// The complete output of one conflict detection run.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictDetectionResult {
    pub conflicts: Vec<Conflict>,
    /// Heuristic load order; empty while a critical loader conflict stands.
    pub load_order: Vec<LoadOrderEntry>,
    /// Colliding namespaces mapped to their providers, in insertion order
    /// per namespace.
    pub namespace_collisions: BTreeMap<String, Vec<String>>,
    /// The subset of `conflicts` with type `api_conflict`.
    pub api_conflicts: Vec<Conflict>,
    pub severity_counts: SeverityCounts,
    pub recommendations: Vec<String>,
}

/// Detects loader-family mixes, known-incompatible pairs, declared
/// conflicts, and namespace collisions, and computes a heuristic load order
/// from explicit `load_before`/`load_after` hints.
#[derive(Debug, Clone, Default)]
pub struct ConflictDetector {
    tables: DetectorTables,
}

impl ConflictDetector {
    pub fn new(tables: DetectorTables) -> Self {
        Self { tables }
    }

    pub fn detect(&self, records: &[ModRecord]) -> ConflictDetectionResult {
        let mods = loader::metadata_from_records(records, &self.tables);
        debug!(mods = mods.len(), "conflict detection started");

        let mut conflicts = Vec::new();
        conflicts.extend(loader_mix_conflict(&mods));
        conflicts.extend(self.known_incompatibilities(&mods));
        conflicts.extend(declared_conflicts(&mods));
        let (namespace_collisions, namespace_conflicts) = namespace_collisions(&mods);
        conflicts.extend(namespace_conflicts);

        let api_conflicts: Vec<Conflict> = conflicts
            .iter()
            .filter(|c| c.conflict_type == ConflictType::ApiConflict)
            .cloned()
            .collect();
        let load_order = heuristic_load_order(&mods, &conflicts);
        let severity_counts = SeverityCounts::tally(&conflicts);
        let recommendations = recommendations(&conflicts, &namespace_collisions);

        ConflictDetectionResult {
            conflicts,
            load_order,
            namespace_collisions,
            api_conflicts,
            severity_counts,
            recommendations,
        }
    }

    /// One `error` conflict per ordered pair matching the incompatibility
    /// table. Directional table entries produce one report per pair;
    /// symmetric entries would produce duplicates, which is accepted.
    fn known_incompatibilities(&self, mods: &[ModMetadata]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for (i, a) in mods.iter().enumerate() {
            for (key, rivals) in &self.tables.incompatible {
                if !a.name.contains(key.as_str()) {
                    continue;
                }
                for rival in rivals {
                    for (j, b) in mods.iter().enumerate() {
                        if i == j || !b.name.contains(rival.as_str()) {
                            continue;
                        }
                        conflicts.push(Conflict {
                            conflict_type: ConflictType::ApiConflict,
                            severity: Severity::Error,
                            mods_involved: vec![a.name.clone(), b.name.clone()],
                            description: format!(
                                "'{}' is known to be incompatible with '{}'",
                                a.name, b.name
                            ),
                            suggestion: format!(
                                "Keep either '{}' or '{}', not both",
                                a.name, b.name
                            ),
                            resolution: None,
                        });
                    }
                }
            }
        }
        conflicts
    }
}

/// One `critical` conflict when Forge-family and Fabric-family mods share a
/// pack, naming every mod on both sides.
fn loader_mix_conflict(mods: &[ModMetadata]) -> Option<Conflict> {
    let forge: Vec<&ModMetadata> = mods.iter().filter(|m| m.loader.is_forge_family()).collect();
    let fabric: Vec<&ModMetadata> = mods.iter().filter(|m| m.loader.is_fabric_family()).collect();
    if forge.is_empty() || fabric.is_empty() {
        return None;
    }
    let mut involved: Vec<String> = forge.iter().map(|m| m.name.clone()).collect();
    involved.extend(fabric.iter().map(|m| m.name.clone()));
    Some(Conflict {
        conflict_type: ConflictType::ApiConflict,
        severity: Severity::Critical,
        mods_involved: involved,
        description: format!(
            "Cannot mix loader families: {} Forge-family and {} Fabric-family mod(s) in one pack",
            forge.len(),
            fabric.len()
        ),
        suggestion: "Split the pack by loader, or replace one side with ports for the other"
            .to_string(),
        resolution: None,
    })
}

/// One `error` conflict per declared `conflicts_with` entry that names
/// another mod in the pack.
fn declared_conflicts(mods: &[ModMetadata]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();
    for (i, a) in mods.iter().enumerate() {
        for declared in &a.conflicts_with {
            let declared = declared.to_lowercase();
            for (j, b) in mods.iter().enumerate() {
                if i == j || b.name != declared {
                    continue;
                }
                conflicts.push(Conflict {
                    conflict_type: ConflictType::DependencyConflict,
                    severity: Severity::Error,
                    mods_involved: vec![a.name.clone(), b.name.clone()],
                    description: format!("'{}' declares a conflict with '{}'", a.name, b.name),
                    suggestion: format!("Remove '{}' or '{}'", a.name, b.name),
                    resolution: None,
                });
            }
        }
    }
    conflicts
}

/// Group mods by declared namespace; every namespace with two or more
/// providers becomes a `warning` conflict.
fn namespace_collisions(
    mods: &[ModMetadata],
) -> (BTreeMap<String, Vec<String>>, Vec<Conflict>) {
    let mut order: Vec<String> = Vec::new();
    let mut providers: HashMap<String, Vec<String>> = HashMap::new();
    for m in mods {
        for namespace in &m.provides {
            providers
                .entry(namespace.clone())
                .or_insert_with(|| {
                    order.push(namespace.clone());
                    Vec::new()
                })
                .push(m.name.clone());
        }
    }

    let mut collisions = BTreeMap::new();
    let mut conflicts = Vec::new();
    for namespace in order {
        let names = &providers[&namespace];
        if names.len() < 2 {
            continue;
        }
        conflicts.push(Conflict {
            conflict_type: ConflictType::NamespaceCollision,
            severity: Severity::Warning,
            mods_involved: names.clone(),
            description: format!(
                "Namespace '{}' is provided by {} mods",
                namespace,
                names.len()
            ),
            suggestion: format!(
                "Keep the first provider '{}' and disable the rest",
                names[0]
            ),
            resolution: None,
        });
        collisions.insert(namespace, names.clone());
    }
    (collisions, conflicts)
}

/// Heuristic ordering from explicit `load_before`/`load_after` hints only —
/// dependency edges play no part here. Hints are not propagated
/// transitively: every hinted mod lands in one "dependent" bucket after the
/// unhinted mods, both buckets alphabetical.
fn heuristic_load_order(mods: &[ModMetadata], conflicts: &[Conflict]) -> Vec<LoadOrderEntry> {
    let blocked = conflicts.iter().any(|c| {
        c.severity == Severity::Critical && c.conflict_type == ConflictType::ApiConflict
    });
    if blocked {
        // Nothing to order until the loader conflict is resolved.
        return Vec::new();
    }

    let (mut independent, mut dependent): (Vec<&ModMetadata>, Vec<&ModMetadata>) = mods
        .iter()
        .partition(|m| m.load_before.is_empty() && m.load_after.is_empty());
    independent.sort_by(|a, b| a.name.cmp(&b.name));
    dependent.sort_by(|a, b| a.name.cmp(&b.name));

    independent
        .into_iter()
        .chain(dependent)
        .enumerate()
        .map(|(index, m)| {
            let hinted = !m.load_before.is_empty() || !m.load_after.is_empty();
            LoadOrderEntry {
                mod_id: m.mod_id.clone(),
                mod_name: m.name.clone(),
                position: index + 1,
                reason: if hinted {
                    "Declares explicit load ordering hints".to_string()
                } else {
                    "No explicit ordering constraints".to_string()
                },
                dependencies: m
                    .load_before
                    .iter()
                    .chain(m.load_after.iter())
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

fn recommendations(
    conflicts: &[Conflict],
    namespace_collisions: &BTreeMap<String, Vec<String>>,
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if conflicts.iter().any(|c| c.severity == Severity::Critical) {
        recommendations.push(
            "Resolve the loader family conflict first: a pack cannot mix Forge-family and \
             Fabric-family mods"
                .to_string(),
        );
    }
    if conflicts.iter().any(|c| c.severity == Severity::Error) {
        recommendations
            .push("Remove one mod from each incompatible pair before converting".to_string());
    }
    if !namespace_collisions.is_empty() {
        recommendations.push(
            "Review namespace collisions; overlapping providers may overwrite each other's assets"
                .to_string(),
        );
    }
    if recommendations.is_empty() && conflicts.is_empty() {
        recommendations.push("No conflicts detected".to_string());
    }
    recommendations
}
