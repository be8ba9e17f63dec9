//! Single-pair shortest paths.
//!
//! - [`dijkstra::execute`] requires every edge weight to be non-negative.
//! - [`bellman_ford::execute`] accepts negative weights and reports a
//!   [`NegativeCycle`] when one makes the distance unbounded.
//!
//! Both reject NaN and infinite weights, follow edge direction, use [`Edge::numeric_weight`] (so unweighted
//! edges cost `1.0`), pick the lightest edge between two adjacent nodes, and
//! return `Ok(None)` when the destination is unreachable.
pub mod bellman_ford;
pub mod dijkstra;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::GraphError;
use crate::graph::Graph;
use crate::newtypes::NodeId;
use crate::path::Cycle;
use crate::structures::Edge;


/// Fails on the first edge whose numeric weight is NaN or infinite.
fn ensure_finite_weights(graph: &Graph) -> Result<(), GraphError> {
    match graph
        .iter_edges()
        .find(|edge| !edge.numeric_weight().is_finite())
    {
        Some(edge) => {
            tracing::debug!(edge = %edge.id(), weight = edge.numeric_weight(), "non-finite weight");
            Err(GraphError::NonFiniteWeight {
                edge: edge.id(),
                weight: edge.numeric_weight(),
            })
        }
        None => Ok(()),
    }
}

/// One entry of Bellman-Ford's next-hop table: the node to move to and the
/// edge that gets there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hop {
    /// The node reached by the hop.
    pub node: NodeId,
    /// The edge crossed.
    pub edge: Edge,
}

/// Evidence that a negative cycle makes the start-to-destination distance
/// unbounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum NegativeCycle {
    /// Negative undirected edges lying between start and destination. Each
    /// forms a negative 2-cycle by crossing it forth and back.
    UndirectedEdges(Vec<Edge>),
    /// The next-hop table at the point a relaxation still succeeded after
    /// `|V| - 1` rounds, and the node that relaxation improved.
    NextHops {
        /// Node → the hop towards the destination.
        next: BTreeMap<NodeId, Hop>,
        /// The node whose distance was still decreasing.
        witness: NodeId,
    },
}

impl NegativeCycle {
    /// Materialises one offending cycle, or `None` if the next-hop table
    /// leads from the witness to a dead end.
    pub fn cycle(&self) -> Option<Cycle> {
        match self {
            NegativeCycle::UndirectedEdges(edges) => {
                let edge = *edges.first()?;
                let (a, b) = (edge.first(), edge.second());
                if edge.is_self_edge() {
                    Cycle::from_nodes(vec![a], vec![edge]).ok()
                } else {
                    Cycle::from_nodes(vec![a, b], vec![edge, edge]).ok()
                }
            }
            NegativeCycle::NextHops { next, witness } => {
                let mut position: BTreeMap<NodeId, usize> = BTreeMap::new();
                let mut nodes = Vec::new();
                let mut edges = Vec::new();
                let mut current = *witness;
                while !position.contains_key(&current) {
                    let hop = next.get(&current)?;
                    position.insert(current, nodes.len());
                    nodes.push(current);
                    edges.push(hop.edge);
                    current = hop.node;
                }
                let at = position.get(&current).copied()?;
                Cycle::from_nodes(nodes.split_off(at), edges.split_off(at)).ok()
            }
        }
    }
}

impl fmt::Display for NegativeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegativeCycle::UndirectedEdges(edges) => write!(
                f,
                "negative cycle: {} negative undirected edge(s) between start and destination",
                edges.len()
            ),
            NegativeCycle::NextHops { witness, .. } => {
                write!(f, "negative cycle reachable through node {witness}")
            }
        }
    }
}
