//! FlowGraph — petgraph view of a layout for structural diagnostics.
//!
//! Nodes are the unique step ids of a layout; edges are the connections
//! whose both ends resolve. Dangling references are kept aside so callers
//! can report them.

use std::collections::{HashMap, HashSet};

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::Serialize;

use super::types::Layout;
use crate::model::Connection;

/// Directed graph over the positioned steps of a layout.
pub struct FlowGraph {
    pub digraph: DiGraph<String, Option<String>>,
    /// Maps step id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
    dangling: Vec<Connection>,
}

impl FlowGraph {
    /// Build from a computed layout.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut digraph: DiGraph<String, Option<String>> = DiGraph::new();
        let mut node_index: HashMap<String, NodeIndex> = HashMap::new();

        for id in layout.positions.keys() {
            let idx = digraph.add_node(id.clone());
            node_index.insert(id.clone(), idx);
        }

        let mut dangling = Vec::new();
        for conn in &layout.connections {
            match (node_index.get(&conn.from), node_index.get(&conn.to)) {
                (Some(&from), Some(&to)) => {
                    digraph.add_edge(from, to, conn.label.clone());
                }
                _ => dangling.push(conn.clone()),
            }
        }

        Self {
            digraph,
            node_index,
            dangling,
        }
    }

    pub fn node_count(&self) -> usize {
        self.digraph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.digraph.edge_count()
    }

    /// Connections with an unknown source or target, in layout order.
    pub fn dangling(&self) -> &[Connection] {
        &self.dangling
    }

    /// Returns true if the graph has no cycles.
    pub fn is_dag(&self) -> bool {
        !is_cyclic_directed(&self.digraph)
    }

    /// Topological order of step ids, or None if the graph has cycles.
    pub fn topological_order(&self) -> Option<Vec<String>> {
        toposort(&self.digraph, None)
            .ok()
            .map(|order| order.into_iter().map(|idx| self.digraph[idx].clone()).collect())
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.degree(id, petgraph::Direction::Incoming)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.degree(id, petgraph::Direction::Outgoing)
    }

    fn degree(&self, id: &str, dir: petgraph::Direction) -> usize {
        match self.node_index.get(id) {
            None => 0,
            Some(&idx) => self.digraph.edges_directed(idx, dir).count(),
        }
    }

    /// Step ids not reachable from any of `roots`, in layout order.
    ///
    /// Unknown roots are ignored; with no known roots every step is unreachable.
    pub fn unreachable_from<S: AsRef<str>>(&self, roots: &[S]) -> Vec<String> {
        let mut seen: HashSet<NodeIndex> = HashSet::new();
        for root in roots {
            let Some(&start) = self.node_index.get(root.as_ref()) else {
                continue;
            };
            let mut dfs = Dfs::new(&self.digraph, start);
            while let Some(idx) = dfs.next(&self.digraph) {
                seen.insert(idx);
            }
        }
        self.digraph
            .node_indices()
            .filter(|idx| !seen.contains(idx))
            .map(|idx| self.digraph[idx].clone())
            .collect()
    }

    /// Summarize the graph's structural problems.
    pub fn diagnostics<S: AsRef<str>>(&self, roots: &[S]) -> Diagnostics {
        Diagnostics {
            steps: self.node_count(),
            connections: self.edge_count() + self.dangling.len(),
            dangling: self.dangling.clone(),
            unreachable: self.unreachable_from(roots),
            has_cycles: !self.is_dag(),
        }
    }
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

/// Structural report for a step list. Cycles are allowed in process flows
/// (rework loops), so `has_cycles` is informational.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub steps: usize,
    pub connections: usize,
    pub dangling: Vec<Connection>,
    pub unreachable: Vec<String>,
    pub has_cycles: bool,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.unreachable.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
