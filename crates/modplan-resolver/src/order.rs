//! Dependency-respecting load-order calculation.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::graph::DependencyGraph;

/// Compute a load order in which every mod appears after its dependencies.
///
/// Kahn's algorithm keyed by out-degree, since an edge A→B means "A depends
/// on B": a mod is ready once all of its dependency targets have been
/// placed. The ready set is re-sorted by display name before every pop, so
/// ties among simultaneously-ready mods always break alphabetically rather
/// than by graph structure. Mods that never become ready — cycle
/// participants, and mods gated on targets absent from the input — are
/// appended in insertion order with a warning.
///
/// Returns the order plus any warnings raised along the way.
pub fn calculate(graph: &DependencyGraph) -> (Vec<String>, Vec<String>) {
    let mod_ids = graph.mod_ids();
    let names: HashMap<String, String> = graph
        .mods()
        .map(|info| (info.mod_id.clone(), info.name.clone()))
        .collect();

    let mut remaining: HashMap<String, usize> = HashMap::new();
    let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
    for id in &mod_ids {
        let deps = graph.dependencies_of(id);
        remaining.insert(id.clone(), deps.len());
        for dep in deps {
            dependents.entry(dep).or_default().push(id.clone());
        }
    }

    let mut ready: Vec<String> = mod_ids
        .iter()
        .filter(|id| remaining[id.as_str()] == 0)
        .cloned()
        .collect();
    let mut order: Vec<String> = Vec::with_capacity(mod_ids.len());

    while !ready.is_empty() {
        ready.sort_by(|a, b| {
            let name_a = names.get(a).map(String::as_str).unwrap_or_default();
            let name_b = names.get(b).map(String::as_str).unwrap_or_default();
            name_a.cmp(name_b)
        });
        let next = ready.remove(0);
        for dependent in dependents.get(&next).into_iter().flatten() {
            if let Some(count) = remaining.get_mut(dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.push(dependent.clone());
                }
            }
        }
        order.push(next);
    }

    let mut warnings = Vec::new();
    if order.len() < mod_ids.len() {
        let placed: HashSet<&String> = order.iter().collect();
        let leftover: Vec<String> = mod_ids
            .iter()
            .filter(|id| !placed.contains(id))
            .cloned()
            .collect();
        warn!(
            unordered = leftover.len(),
            "load order incomplete; appending remaining mods in insertion order"
        );
        warnings.push(format!(
            "Could not order {} mod(s) due to circular or unresolved dependencies; \
             appended in manifest order: {}",
            leftover.len(),
            leftover.join(", ")
        ));
        order.extend(leftover);
    }

    (order, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use modplan_core::record::ModRecord;
    use serde_json::json;

    fn graph(values: serde_json::Value) -> DependencyGraph {
        let records: Vec<ModRecord> = serde_json::from_value(values).unwrap();
        DependencyGraph::from_records(&records)
    }

    fn position(order: &[String], id: &str) -> usize {
        order.iter().position(|m| m == id).unwrap()
    }

    #[test]
    fn dependencies_come_first() {
        let g = graph(json!([
            { "id": "a", "name": "Alpha", "dependencies": ["b"] },
            { "id": "b", "name": "Beta" }
        ]));
        let (order, warnings) = calculate(&g);
        assert_eq!(order, vec!["b", "a"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn every_edge_respected_in_acyclic_graph() {
        let g = graph(json!([
            { "id": "app", "name": "App", "dependencies": ["lib", "core"] },
            { "id": "lib", "name": "Lib", "dependencies": ["core"] },
            { "id": "core", "name": "Core" },
            { "id": "extra", "name": "Extra", "dependencies": ["lib"] }
        ]));
        let (order, warnings) = calculate(&g);
        assert!(warnings.is_empty());
        assert_eq!(order.len(), 4);
        assert!(position(&order, "core") < position(&order, "lib"));
        assert!(position(&order, "lib") < position(&order, "app"));
        assert!(position(&order, "lib") < position(&order, "extra"));
    }

    #[test]
    fn ties_break_alphabetically_by_name() {
        let g = graph(json!([
            { "id": "3", "name": "Zeta" },
            { "id": "1", "name": "Alpha" },
            { "id": "2", "name": "Midway" }
        ]));
        let (order, _) = calculate(&g);
        assert_eq!(order, vec!["1", "2", "3"]);
    }

    #[test]
    fn cycle_falls_back_to_insertion_order() {
        let g = graph(json!([
            { "id": "a", "name": "Alpha", "dependencies": ["b"] },
            { "id": "b", "name": "Beta", "dependencies": ["a"] }
        ]));
        let (order, warnings) = calculate(&g);
        assert_eq!(order, vec!["a", "b"]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("circular or unresolved"));
    }

    #[test]
    fn missing_target_gates_its_dependent() {
        let g = graph(json!([
            { "id": "a", "name": "Alpha", "dependencies": ["ghost"] },
            { "id": "b", "name": "Beta" }
        ]));
        let (order, warnings) = calculate(&g);
        // "b" orders normally; "a" waits on a target that never arrives and
        // is appended by the fallback.
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn empty_graph_orders_nothing() {
        let g = DependencyGraph::new();
        let (order, warnings) = calculate(&g);
        assert!(order.is_empty());
        assert!(warnings.is_empty());
    }
}
