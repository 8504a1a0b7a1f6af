//! Dependency analysis entry points.
//!
//! Structural findings — cycles, version conflicts, missing dependencies —
//! are result fields on a `success = true` result, because a modpack with
//! findings may still be partially convertible. Only fatal input errors
//! produce `success = false`, and then no partial graph is returned.

use modplan_core::mods::{DependencyType, ModDependency};
use modplan_core::record::{self, ModRecord};
use modplan_util::errors::ModplanError;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::conflict::{self, VersionConflict};
use crate::cycle::{self, CircularDependency};
use crate::graph::DependencyGraph;
use crate::order;

/// The complete output of one dependency analysis run.
///
/// Callers must check `success` before trusting any other field.
#[derive(Debug, Serialize)]
pub struct DependencyAnalysisResult {
    pub graph: DependencyGraph,
    pub circular_dependencies: Vec<CircularDependency>,
    pub version_conflicts: Vec<VersionConflict>,
    /// Recommended load order as mod ids, dependencies first.
    pub load_order: Vec<String>,
    /// Required dependencies whose target mod is absent from the input.
    pub missing_dependencies: Vec<ModDependency>,
    pub warnings: Vec<String>,
    pub success: bool,
    pub error_message: Option<String>,
}

/// Analyze a normalized mod list.
///
/// Pure and deterministic: the same input always yields the same result,
/// and no state is carried between calls.
pub fn analyze(records: &[ModRecord]) -> DependencyAnalysisResult {
    match try_analyze(records) {
        Ok(result) => result,
        Err(err) => failure(err.to_string()),
    }
}

/// Analyze a manifest-shaped JSON value.
///
/// Accepts a bare array, a CurseForge-style `files` array, or a generic
/// `mods` array. Input errors become a `success = false` result rather
/// than an `Err`.
pub fn analyze_value(manifest: &Value) -> DependencyAnalysisResult {
    match record::records_from_value(manifest) {
        Ok(records) => analyze(&records),
        Err(err) => failure(err.to_string()),
    }
}

fn try_analyze(records: &[ModRecord]) -> Result<DependencyAnalysisResult, ModplanError> {
    let graph = DependencyGraph::from_records(records);
    debug!(mods = graph.mod_count(), "dependency graph built");

    let mut warnings = data_quality_warnings(records);
    let circular_dependencies = cycle::find_cycles(&graph);
    let version_conflicts = conflict::detect_version_conflicts(&graph);
    let (load_order, order_warnings) = order::calculate(&graph);
    warnings.extend(order_warnings);
    let missing_dependencies = missing_dependencies(&graph);

    Ok(DependencyAnalysisResult {
        graph,
        circular_dependencies,
        version_conflicts,
        load_order,
        missing_dependencies,
        warnings,
        success: true,
        error_message: None,
    })
}

/// Required dependencies pointing at mods absent from the input, in mod
/// insertion order. Optional, embedded, and incompatible dependencies are
/// never flagged.
fn missing_dependencies(graph: &DependencyGraph) -> Vec<ModDependency> {
    let mut missing = Vec::new();
    for info in graph.mods() {
        for dep in &info.dependencies {
            if dep.dependency_type == DependencyType::Required && !graph.contains_mod(&dep.mod_id)
            {
                missing.push(dep.clone());
            }
        }
    }
    missing
}

fn data_quality_warnings(records: &[ModRecord]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.key().is_empty())
        .map(|(position, record)| {
            let label = record.display_name();
            if label.is_empty() {
                format!("Mod record at position {position} has no id")
            } else {
                format!("Mod record '{label}' has no id")
            }
        })
        .collect()
}

fn failure(message: String) -> DependencyAnalysisResult {
    DependencyAnalysisResult {
        graph: DependencyGraph::new(),
        circular_dependencies: Vec::new(),
        version_conflicts: Vec::new(),
        load_order: Vec::new(),
        missing_dependencies: Vec::new(),
        warnings: Vec::new(),
        success: false,
        error_message: Some(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: serde_json::Value) -> Vec<ModRecord> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn simple_chain_orders_dependency_first() {
        let mods = records(json!([
            { "id": "A", "name": "Alpha", "dependencies": ["B"] },
            { "id": "B", "name": "Beta" }
        ]));
        let result = analyze(&mods);
        assert!(result.success);
        assert_eq!(result.load_order, vec!["B", "A"]);
        assert!(result.circular_dependencies.is_empty());
        assert!(result.missing_dependencies.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn mutual_dependency_reports_cycle_and_falls_back() {
        let mods = records(json!([
            { "id": "A", "name": "Alpha", "dependencies": ["B"] },
            { "id": "B", "name": "Beta", "dependencies": ["A"] }
        ]));
        let result = analyze(&mods);
        assert!(result.success);
        assert_eq!(result.circular_dependencies.len(), 1);
        assert!(result.circular_dependencies[0].cycle.contains(&"A".to_string()));
        assert!(result.circular_dependencies[0].cycle.contains(&"B".to_string()));
        // Fallback keeps every mod, in insertion order.
        assert_eq!(result.load_order, vec!["A", "B"]);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn absent_required_dependency_is_reported_missing() {
        let mods = records(json!([
            { "id": "A", "name": "Alpha", "dependencies": [
                { "id": "C", "type": "required" }
            ] },
            { "id": "B", "name": "Beta" }
        ]));
        let result = analyze(&mods);
        assert_eq!(result.missing_dependencies.len(), 1);
        assert_eq!(result.missing_dependencies[0].mod_id, "C");
    }

    #[test]
    fn optional_dependencies_are_never_missing() {
        let mods = records(json!([
            { "id": "A", "dependencies": [
                { "id": "C", "type": "optional" },
                { "id": "D", "type": "embedded" },
                { "id": "E", "type": "incompatible" }
            ] }
        ]));
        let result = analyze(&mods);
        assert!(result.missing_dependencies.is_empty());
    }

    #[test]
    fn analysis_is_idempotent() {
        let mods = records(json!([
            { "id": "A", "name": "Alpha", "version": "1.0", "dependencies": ["B"] },
            { "id": "B", "name": "Beta", "dependencies": ["A"] },
            { "id": "C", "name": "Alpha", "version": "2.0" }
        ]));
        let first = serde_json::to_value(analyze(&mods)).unwrap();
        let second = serde_json::to_value(analyze(&mods)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn record_without_id_warns_instead_of_failing() {
        let mods = records(json!([{ "name": "Nameless Wonder" }]));
        let result = analyze(&mods);
        assert!(result.success);
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Nameless Wonder"));
    }

    #[test]
    fn manifest_value_shapes() {
        let curseforge = json!({
            "files": [
                { "projectID": 1, "name": "One" },
                { "projectID": 2, "name": "Two", "dependencies": [{ "projectID": 1 }] }
            ]
        });
        let result = analyze_value(&curseforge);
        assert!(result.success);
        assert_eq!(result.load_order, vec!["1", "2"]);
    }

    #[test]
    fn malformed_manifest_fails_without_partial_graph() {
        let result = analyze_value(&json!({ "minecraft": { "version": "1.20.1" } }));
        assert!(!result.success);
        assert!(result.error_message.is_some());
        assert!(result.graph.is_empty());
        assert!(result.load_order.is_empty());
    }
}
