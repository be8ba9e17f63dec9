//! Conversion of a [`Graph`] into `petgraph` structures, used as the
//! reference implementation in comparison benchmarks and correctness tests.

use std::collections::BTreeMap;

use graphkit_core::{Graph, NodeId};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};

/// A `petgraph` copy of a [`Graph`] with the node mapping between them.
#[derive(Debug, Clone)]
pub struct Baseline<G> {
    /// The converted graph; node weights are the original ids.
    pub graph: G,
    /// Index of each original node in `graph`.
    pub index: BTreeMap<NodeId, NodeIndex>,
}

impl<G> Baseline<G> {
    /// The petgraph index of `node`, if it was converted.
    pub fn index_of(&self, node: NodeId) -> Option<NodeIndex> {
        self.index.get(&node).copied()
    }
}

/// Converts `graph` into a directed petgraph graph that follows edge
/// direction: directed edges are copied, undirected edges become a pair of
/// opposite arcs.
pub fn to_directed(graph: &Graph) -> Baseline<DiGraph<NodeId, f64>> {
    let mut out = DiGraph::with_capacity(graph.node_count(), graph.edge_count() * 2);
    let index: BTreeMap<NodeId, NodeIndex> =
        graph.nodes().map(|node| (node, out.add_node(node))).collect();
    for edge in graph.iter_edges() {
        let (Some(&a), Some(&b)) = (index.get(&edge.first()), index.get(&edge.second())) else {
            continue;
        };
        out.add_edge(a, b, edge.numeric_weight());
        if !edge.is_directed() && a != b {
            out.add_edge(b, a, edge.numeric_weight());
        }
    }
    Baseline { graph: out, index }
}

/// Converts `graph` into an undirected petgraph graph, ignoring direction.
pub fn to_undirected(graph: &Graph) -> Baseline<UnGraph<NodeId, f64>> {
    let mut out = UnGraph::with_capacity(graph.node_count(), graph.edge_count());
    let index: BTreeMap<NodeId, NodeIndex> =
        graph.nodes().map(|node| (node, out.add_node(node))).collect();
    for edge in graph.iter_edges() {
        let (Some(&a), Some(&b)) = (index.get(&edge.first()), index.get(&edge.second())) else {
            continue;
        };
        out.add_edge(a, b, edge.numeric_weight());
    }
    Baseline { graph: out, index }
}
