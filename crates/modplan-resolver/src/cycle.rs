//! Circular dependency detection.

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;

/// A circular dependency chain.
///
/// `cycle` repeats the first mod id as the last element to close the loop,
/// so a self-dependency is reported as `[m, m]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircularDependency {
    pub cycle: Vec<String>,
    pub description: String,
}

struct Frame {
    neighbors: Vec<NodeIndex>,
    cursor: usize,
}

/// Find circular dependency chains.
///
/// Depth-first search over every unvisited node, driven by an explicit frame
/// stack so large modpacks cannot exhaust the call stack. Visiting a
/// neighbor already on the current path records the sub-path from that
/// neighbor's first occurrence through the current node, closed with the
/// neighbor again, and aborts that DFS tree. At most one cycle is therefore
/// reported per tree: disjoint cycles are each found, but overlapping cycles
/// sharing a component may yield a single report. That under-reporting is
/// the documented behavior.
pub fn find_cycles(dep_graph: &DependencyGraph) -> Vec<CircularDependency> {
    let graph = dep_graph.inner();
    let mut cycles = Vec::new();
    let mut visited = vec![false; graph.node_count()];
    let mut on_path = vec![false; graph.node_count()];

    for start in graph.node_indices() {
        if visited[start.index()] {
            continue;
        }
        visited[start.index()] = true;
        on_path[start.index()] = true;
        let mut path: Vec<NodeIndex> = vec![start];
        let mut stack: Vec<Frame> = vec![Frame {
            neighbors: dep_graph.out_neighbors(start),
            cursor: 0,
        }];

        while let Some(top) = stack.len().checked_sub(1) {
            let next = {
                let frame = &mut stack[top];
                if frame.cursor < frame.neighbors.len() {
                    frame.cursor += 1;
                    Some(frame.neighbors[frame.cursor - 1])
                } else {
                    None
                }
            };

            match next {
                Some(next) if !visited[next.index()] => {
                    visited[next.index()] = true;
                    on_path[next.index()] = true;
                    path.push(next);
                    stack.push(Frame {
                        neighbors: dep_graph.out_neighbors(next),
                        cursor: 0,
                    });
                }
                Some(next) if on_path[next.index()] => {
                    let first = path
                        .iter()
                        .position(|&node| node == next)
                        .unwrap_or_default();
                    let mut chain: Vec<String> = path[first..]
                        .iter()
                        .map(|&node| graph[node].mod_id.clone())
                        .collect();
                    chain.push(graph[next].mod_id.clone());
                    cycles.push(CircularDependency {
                        description: format!(
                            "Circular dependency detected: {}",
                            chain.join(" -> ")
                        ),
                        cycle: chain,
                    });
                    // Abort this tree; unwind path state so later trees
                    // start clean.
                    for node in path.drain(..) {
                        on_path[node.index()] = false;
                    }
                    stack.clear();
                }
                Some(_) => {}
                None => {
                    stack.pop();
                    if let Some(node) = path.pop() {
                        on_path[node.index()] = false;
                    }
                }
            }
        }
    }

    cycles
}
