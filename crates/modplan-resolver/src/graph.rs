//! Dependency graph construction and traversal.

use std::collections::{BTreeMap, HashMap};

use modplan_core::mods::{DependencyType, ModInfo};
use modplan_core::record::ModRecord;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A node in the dependency graph.
///
/// Nodes exist for every mod id referenced anywhere, including dependency
/// targets absent from the input; those carry no `ModInfo` and are not
/// counted as mods.
#[derive(Debug, Clone)]
pub struct ModNode {
    pub mod_id: String,
    pub info: Option<ModInfo>,
}

/// Edge label: the declared dependency kind.
#[derive(Debug, Clone)]
pub struct DepEdge {
    pub kind: DependencyType,
}

/// A directed "depends-on" graph backed by petgraph.
///
/// An edge A→B means "A depends on B". Forward and reverse adjacency are
/// two views of the same edge set, so they can never drift apart.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<ModNode, DepEdge>,
    /// Lookup from mod id to node index.
    index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Build a graph from raw records.
    ///
    /// Every record yields exactly one mod node. Mods are inserted before any
    /// dependency edges so node insertion order matches the input order.
    /// Dependency edges are recorded even when their target is absent from
    /// the input; absence is the missing-dependency check's concern, not the
    /// builder's.
    pub fn from_records(records: &[ModRecord]) -> Self {
        let mut graph = Self::new();
        let infos: Vec<ModInfo> = records.iter().map(ModRecord::to_mod_info).collect();
        for info in &infos {
            graph.insert_mod(info.clone());
        }
        for info in &infos {
            for dep in &info.dependencies {
                graph.add_dependency(&info.mod_id, &dep.mod_id, dep.dependency_type);
            }
        }
        graph
    }

    /// Add or retrieve a node for `mod_id` without registering mod metadata.
    fn ensure_node(&mut self, mod_id: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(mod_id) {
            return idx;
        }
        let idx = self.graph.add_node(ModNode {
            mod_id: mod_id.to_string(),
            info: None,
        });
        self.index.insert(mod_id.to_string(), idx);
        idx
    }

    /// Register a mod. Re-registering an id replaces its metadata.
    pub fn insert_mod(&mut self, info: ModInfo) -> NodeIndex {
        let idx = self.ensure_node(&info.mod_id);
        self.graph[idx].info = Some(info);
        idx
    }

    /// Record a "depends-on" edge. Duplicate edges between the same pair are
    /// not added twice.
    pub fn add_dependency(&mut self, from: &str, to: &str, kind: DependencyType) {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);
        if !self.graph.edges(from_idx).any(|e| e.target() == to_idx) {
            self.graph.add_edge(from_idx, to_idx, DepEdge { kind });
        }
    }

    /// Whether `mod_id` is a registered mod (not just an edge target).
    pub fn contains_mod(&self, mod_id: &str) -> bool {
        self.index
            .get(mod_id)
            .is_some_and(|&idx| self.graph[idx].info.is_some())
    }

    pub fn mod_info(&self, mod_id: &str) -> Option<&ModInfo> {
        self.index
            .get(mod_id)
            .and_then(|&idx| self.graph[idx].info.as_ref())
    }

    /// Registered mods in insertion order.
    pub fn mods(&self) -> impl Iterator<Item = &ModInfo> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph[idx].info.as_ref())
    }

    /// Registered mod ids in insertion order.
    pub fn mod_ids(&self) -> Vec<String> {
        self.mods().map(|info| info.mod_id.clone()).collect()
    }

    pub fn mod_count(&self) -> usize {
        self.mods().count()
    }

    pub fn is_empty(&self) -> bool {
        self.mod_count() == 0
    }

    /// Ids this mod depends on, in declared order.
    pub fn dependencies_of(&self, mod_id: &str) -> Vec<String> {
        match self.index.get(mod_id) {
            Some(&idx) => self
                .out_neighbors(idx)
                .into_iter()
                .map(|n| self.graph[n].mod_id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Ids of mods that depend on this one, in declared order.
    pub fn dependents_of(&self, mod_id: &str) -> Vec<String> {
        match self.index.get(mod_id) {
            Some(&idx) => self
                .in_neighbors(idx)
                .into_iter()
                .map(|n| self.graph[n].mod_id.clone())
                .collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn inner(&self) -> &DiGraph<ModNode, DepEdge> {
        &self.graph
    }

    /// Outgoing neighbors in edge-insertion order (petgraph iterates
    /// adjacency most-recent-first, so the collected list is reversed).
    pub(crate) fn out_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| e.target())
            .collect();
        out.reverse();
        out
    }

    pub(crate) fn in_neighbors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut inc: Vec<NodeIndex> = self
            .graph
            .edges_directed(idx, Direction::Incoming)
            .map(|e| e.source())
            .collect();
        inc.reverse();
        inc
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializes as the three maps `mods`, `edges`, and `reverse_edges`.
/// Empty adjacency lists are omitted.
impl Serialize for DependencyGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut mods: BTreeMap<&str, &ModInfo> = BTreeMap::new();
        let mut edges: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        let mut reverse_edges: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

        for idx in self.graph.node_indices() {
            let node = &self.graph[idx];
            if let Some(ref info) = node.info {
                mods.insert(&node.mod_id, info);
            }
            let out: Vec<&str> = self
                .out_neighbors(idx)
                .into_iter()
                .map(|n| self.graph[n].mod_id.as_str())
                .collect();
            if !out.is_empty() {
                edges.insert(&node.mod_id, out);
            }
            let inc: Vec<&str> = self
                .in_neighbors(idx)
                .into_iter()
                .map(|n| self.graph[n].mod_id.as_str())
                .collect();
            if !inc.is_empty() {
                reverse_edges.insert(&node.mod_id, inc);
            }
        }

        let mut state = serializer.serialize_struct("DependencyGraph", 3)?;
        state.serialize_field("mods", &mods)?;
        state.serialize_field("edges", &edges)?;
        state.serialize_field("reverse_edges", &reverse_edges)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ModRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn build_from_records() {
        let records = vec![
            record(json!({ "id": "a", "name": "Alpha", "dependencies": ["b"] })),
            record(json!({ "id": "b", "name": "Beta" })),
        ];
        let graph = DependencyGraph::from_records(&records);
        assert_eq!(graph.mod_count(), 2);
        assert_eq!(graph.dependencies_of("a"), vec!["b"]);
        assert_eq!(graph.dependents_of("b"), vec!["a"]);
        assert!(graph.dependencies_of("b").is_empty());
    }

    #[test]
    fn dangling_dependency_target_is_not_a_mod() {
        let records = vec![record(json!({ "id": "a", "dependencies": ["ghost"] }))];
        let graph = DependencyGraph::from_records(&records);
        assert_eq!(graph.mod_count(), 1);
        assert!(!graph.contains_mod("ghost"));
        // The edge is still recorded.
        assert_eq!(graph.dependencies_of("a"), vec!["ghost"]);
        assert_eq!(graph.dependents_of("ghost"), vec!["a"]);
    }

    #[test]
    fn insertion_order_survives_dangling_targets() {
        let records = vec![
            record(json!({ "id": "a", "dependencies": ["c"] })),
            record(json!({ "id": "b" })),
            record(json!({ "id": "c" })),
        ];
        let graph = DependencyGraph::from_records(&records);
        assert_eq!(graph.mod_ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let records = vec![
            record(json!({ "id": "a", "dependencies": ["b", "b"] })),
            record(json!({ "id": "b" })),
        ];
        let graph = DependencyGraph::from_records(&records);
        assert_eq!(graph.dependencies_of("a"), vec!["b"]);
    }

    #[test]
    fn declared_dependency_order_is_preserved() {
        let records = vec![record(
            json!({ "id": "a", "dependencies": ["b", "c", "d"] }),
        )];
        let graph = DependencyGraph::from_records(&records);
        assert_eq!(graph.dependencies_of("a"), vec!["b", "c", "d"]);
    }

    #[test]
    fn serializes_as_three_maps() {
        let records = vec![
            record(json!({ "id": "a", "name": "Alpha", "dependencies": ["b"] })),
            record(json!({ "id": "b", "name": "Beta" })),
        ];
        let graph = DependencyGraph::from_records(&records);
        let value = serde_json::to_value(&graph).unwrap();
        assert!(value["mods"]["a"].is_object());
        assert_eq!(value["edges"]["a"], json!(["b"]));
        assert_eq!(value["reverse_edges"]["b"], json!(["a"]));
    }
}
