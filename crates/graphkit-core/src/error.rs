//! Error type shared by the graph container and every algorithm.
//!
//! "No path exists" and "the graph is acyclic" are not errors; they are
//! reported as `None` by the respective operations.
use thiserror::Error;

use crate::constraints::Constraints;
use crate::graph::shortest_path::NegativeCycle;
use crate::newtypes::{EdgeId, NodeId};

/// All error conditions raised by `graphkit-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// A node argument is not a member of the graph.
    #[error("node {0} is not a member of the graph")]
    NodeNotFound(NodeId),

    /// An edge argument is not a member of the graph.
    #[error("edge {0} is not a member of the graph")]
    EdgeNotFound(EdgeId),

    /// A node was used as an endpoint of an edge it does not touch.
    #[error("node {node} is not an endpoint of edge {edge}")]
    InvalidEndpoint {
        /// The edge that was queried.
        edge: EdgeId,
        /// The node that is not one of its endpoints.
        node: NodeId,
    },

    /// An edge was registered twice with the same node's adjacency list.
    #[error("edge {edge} is already registered with node {node}")]
    DuplicateRegistration {
        /// The edge being registered.
        edge: EdgeId,
        /// The node whose adjacency list already holds it.
        node: NodeId,
    },

    /// An edge was unregistered from a node that does not hold it.
    #[error("edge {edge} is not registered with node {node}")]
    MissingRegistration {
        /// The edge being unregistered.
        edge: EdgeId,
        /// The node whose adjacency list lacks it.
        node: NodeId,
    },

    /// An edge with the same id is already a member of the graph.
    #[error("edge {0} is already a member of the graph")]
    DuplicateEdge(EdgeId),

    /// Adding the edge would break one of the graph's constraints.
    #[error("edge {edge} rejected: {violation}")]
    ConstraintViolation {
        /// The rejected edge.
        edge: EdgeId,
        /// Which constraint it would break.
        violation: ConstraintViolation,
    },

    /// The two nodes are expected to be adjacent but no edge joins them.
    #[error("no edge leads from {from} to {to}")]
    NoEdgeBetween {
        /// Node the edge should leave.
        from: NodeId,
        /// Node the edge should reach.
        to: NodeId,
    },

    /// Dijkstra's algorithm was given a graph with a negative edge weight.
    #[error("edge {edge} has negative weight {weight}; use Bellman-Ford instead of Dijkstra")]
    NegativeWeight {
        /// The offending edge.
        edge: EdgeId,
        /// Its weight.
        weight: f64,
    },

    /// An edge weight is NaN or infinite, so no path length through it is
    /// defined.
    #[error("edge {edge} has non-finite weight {weight}")]
    NonFiniteWeight {
        /// The offending edge.
        edge: EdgeId,
        /// Its weight.
        weight: f64,
    },

    /// Bellman-Ford found a negative cycle between start and destination.
    #[error("{0}")]
    NegativeCycle(NegativeCycle),

    /// A node and edge sequence has no start node, or not exactly one more
    /// node than edges.
    #[error("malformed path: {nodes} node(s) with {edges} edge(s)")]
    MalformedPath {
        /// Number of nodes supplied.
        nodes: usize,
        /// Number of edges supplied.
        edges: usize,
    },

    /// A node and edge sequence does not describe a closed walk.
    #[error("malformed cycle: {nodes} node(s) with {edges} edge(s)")]
    MalformedCycle {
        /// Number of nodes supplied.
        nodes: usize,
        /// Number of edges supplied.
        edges: usize,
    },

    /// A constraint set is self-contradictory.
    #[error("invalid constraints {constraints:?}: {reason}")]
    InvalidConstraints {
        /// The rejected set.
        constraints: Constraints,
        /// Human-readable explanation.
        reason: &'static str,
    },
}

/// Reason an edge was refused by [`crate::Graph::try_add_edge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    /// Self-edges require [`Constraints::MULTIGRAPH`].
    #[error("self-edges require a multigraph")]
    SelfEdge,
    /// A simple graph already holds an edge between these endpoints.
    #[error("a simple graph already connects these endpoints")]
    ParallelEdge,
    /// The graph does not allow directed edges.
    #[error("the graph does not allow directed edges")]
    DirectedEdge,
    /// The graph does not allow undirected edges.
    #[error("the graph does not allow undirected edges")]
    UndirectedEdge,
}
