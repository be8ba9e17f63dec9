use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::newtypes::{EdgeId, NodeId};
use crate::pair::{OrderedPair, UnorderedPair};

/// Weight every weight-dependent algorithm assumes for an unweighted edge.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// An edge between two nodes.
///
/// Endpoint order only matters when the edge is directed: `first` is the
/// source and `second` the sink. An edge whose two endpoints are the same node
/// is a self-edge; this is a structural property, not a tag.
///
/// The weight is optional. [`Edge::numeric_weight`] resolves a missing weight
/// to [`DEFAULT_WEIGHT`], which is what lets breadth-first search, unweighted
/// shortest paths and weighted shortest paths share one implementation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    id: EdgeId,
    endpoints: OrderedPair<NodeId>,
    directed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    weight: Option<f64>,
}

impl Edge {
    /// Creates an unweighted edge.
    pub fn new(id: EdgeId, first: NodeId, second: NodeId, directed: bool) -> Self {
        Self {
            id,
            endpoints: OrderedPair::new(first, second),
            directed,
            weight: None,
        }
    }

    /// Creates an unweighted undirected edge.
    pub fn undirected(id: EdgeId, a: NodeId, b: NodeId) -> Self {
        Self::new(id, a, b, false)
    }

    /// Creates an unweighted directed edge from `source` to `sink`.
    pub fn directed(id: EdgeId, source: NodeId, sink: NodeId) -> Self {
        Self::new(id, source, sink, true)
    }

    /// Creates a weighted edge.
    pub fn weighted(id: EdgeId, first: NodeId, second: NodeId, directed: bool, weight: f64) -> Self {
        Self::new(id, first, second, directed).with_weight(weight)
    }

    /// Returns a copy of this edge carrying `weight`.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn endpoints(&self) -> OrderedPair<NodeId> {
        self.endpoints
    }

    pub fn first(&self) -> NodeId {
        *self.endpoints.first()
    }

    pub fn second(&self) -> NodeId {
        *self.endpoints.second()
    }

    /// The node a directed edge leaves. Same as [`Edge::first`].
    pub fn source(&self) -> NodeId {
        self.first()
    }

    /// The node a directed edge enters. Same as [`Edge::second`].
    pub fn sink(&self) -> NodeId {
        self.second()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// The explicit weight, if any.
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn is_weighted(&self) -> bool {
        self.weight.is_some()
    }

    /// The explicit weight, or [`DEFAULT_WEIGHT`] for an unweighted edge.
    pub fn numeric_weight(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }

    /// Returns `true` if both endpoints are the same node.
    pub fn is_self_edge(&self) -> bool {
        self.first() == self.second()
    }

    /// The key under which a graph groups this edge with its parallels.
    pub fn key(&self) -> UnorderedPair<NodeId> {
        self.endpoints.unordered()
    }

    /// Returns `true` if `node` is one of the endpoints.
    pub fn has_endpoint(&self, node: NodeId) -> bool {
        self.endpoints.contains(&node)
    }

    /// Returns `true` if this edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        self.key() == UnorderedPair::new(a, b)
    }

    /// Returns the endpoint opposite `node`. A self-edge returns `node`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidEndpoint`] if `node` is not an endpoint.
    pub fn other_endpoint(&self, node: NodeId) -> Result<NodeId, GraphError> {
        if self.first() == node {
            Ok(self.second())
        } else if self.second() == node {
            Ok(self.first())
        } else {
            Err(GraphError::InvalidEndpoint {
                edge: self.id,
                node,
            })
        }
    }

    /// Returns the node reached by crossing this edge from `node`, honouring
    /// direction, or `None` if the edge cannot be crossed from there.
    pub fn traversable_from(&self, node: NodeId) -> Option<NodeId> {
        if self.directed {
            (self.source() == node).then(|| self.sink())
        } else {
            self.other_endpoint(node).ok()
        }
    }
}
