//! Paths and cycles returned by the algorithms.
//!
//! A [`Path`] is a start node followed by zero or more edges, each of which
//! leads to the next node. Its [`Path::length`] is the sum of the numeric
//! weights of the traversed edges. A [`Cycle`] is a non-trivial path whose last
//! node is its first node.
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::GraphError;
use crate::newtypes::NodeId;
use crate::structures::Edge;

/// An ordered sequence of nodes joined by specific edges.
///
/// Invariant: `nodes.len() == edges.len() + 1`, and `edges[i]` joins
/// `nodes[i]` and `nodes[i + 1]`. Deserialization enforces it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl Path {
    /// Creates the zero-length path consisting of `start` alone.
    pub fn new(start: NodeId) -> Self {
        Self {
            nodes: vec![start],
            edges: Vec::new(),
        }
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn end(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` for a single-node path with no edges.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Sum of the numeric weights of the traversed edges.
    pub fn length(&self) -> f64 {
        self.edges.iter().map(Edge::numeric_weight).sum()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Returns `true` if the path has at least one edge and ends where it
    /// started.
    pub fn is_closed(&self) -> bool {
        !self.is_trivial() && self.start() == self.end()
    }

    /// Extends the path past its end node across `edge`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidEndpoint`] if `edge` does not touch the
    /// current end node.
    pub fn append(&mut self, edge: Edge) -> Result<(), GraphError> {
        let next = edge.other_endpoint(self.end())?;
        self.edges.push(edge);
        self.nodes.push(next);
        Ok(())
    }

    /// Extends the path before its start node across `edge`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidEndpoint`] if `edge` does not touch the
    /// current start node.
    pub fn prepend(&mut self, edge: Edge) -> Result<(), GraphError> {
        let previous = edge.other_endpoint(self.start())?;
        self.edges.insert(0, edge);
        self.nodes.insert(0, previous);
        Ok(())
    }
}

/// Serialized shape of a [`Path`], before its invariant is checked.
#[derive(Deserialize)]
struct RawPath {
    nodes: Vec<NodeId>,
    edges: Vec<Edge>,
}

impl TryFrom<RawPath> for Path {
    type Error = GraphError;

    /// Rebuilds the path edge by edge from its first node.
    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        let malformed = GraphError::MalformedPath {
            nodes: raw.nodes.len(),
            edges: raw.edges.len(),
        };
        let Some((&start, rest)) = raw.nodes.split_first() else {
            return Err(malformed);
        };
        if rest.len() != raw.edges.len() {
            return Err(malformed);
        }
        let mut path = Path::new(start);
        for (edge, &expected) in raw.edges.into_iter().zip(rest) {
            path.append(edge)?;
            if path.end() != expected {
                return Err(GraphError::InvalidEndpoint {
                    edge: edge.id(),
                    node: expected,
                });
            }
        }
        Ok(path)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = RawPath::deserialize(d)?;
        Self::try_from(raw).map_err(de::Error::custom)
    }
}

/// A closed [`Path`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cycle(Path);

impl Cycle {
    /// Wraps `path` if it is closed; returns `None` otherwise.
    pub fn from_path(path: Path) -> Option<Self> {
        path.is_closed().then_some(Self(path))
    }

    /// Builds a cycle from its distinct nodes and the edges joining them, with
    /// `edges[i]` joining `nodes[i]` to `nodes[(i + 1) % nodes.len()]`.
    ///
    /// # Errors
    ///
    /// - [`GraphError::MalformedCycle`] if `nodes` is empty or the two slices
    ///   differ in length.
    /// - [`GraphError::InvalidEndpoint`] if an edge does not join its two
    ///   nodes.
    pub fn from_nodes(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        if nodes.is_empty() || nodes.len() != edges.len() {
            return Err(GraphError::MalformedCycle {
                nodes: nodes.len(),
                edges: edges.len(),
            });
        }
        let count = nodes.len();
        let mut path = Path::new(nodes[0]);
        for (i, edge) in edges.into_iter().enumerate() {
            let expected = nodes[(i + 1) % count];
            path.append(edge)?;
            if path.end() != expected {
                return Err(GraphError::InvalidEndpoint {
                    edge: edge.id(),
                    node: expected,
                });
            }
        }
        Ok(Self(path))
    }

    /// The closed path, whose last node repeats the first.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path(self) -> Path {
        self.0
    }

    /// The distinct nodes of the cycle, without the closing repetition.
    pub fn nodes(&self) -> &[NodeId] {
        let nodes = self.0.nodes();
        &nodes[..nodes.len() - 1]
    }

    pub fn edges(&self) -> &[Edge] {
        self.0.edges()
    }

    /// Number of edges in the cycle.
    pub fn len(&self) -> usize {
        self.0.hops()
    }

    /// Always `false`: a cycle has at least one edge.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sum of the numeric weights around the cycle.
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.0.contains_node(node)
    }
}

impl From<Cycle> for Path {
    fn from(cycle: Cycle) -> Self {
        cycle.0
    }
}

impl TryFrom<Path> for Cycle {
    type Error = GraphError;

    fn try_from(path: Path) -> Result<Self, Self::Error> {
        let (nodes, edges) = (path.nodes().len(), path.hops());
        Self::from_path(path).ok_or(GraphError::MalformedCycle { nodes, edges })
    }
}

impl<'de> Deserialize<'de> for Cycle {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let path = Path::deserialize(d)?;
        Self::try_from(path).map_err(de::Error::custom)
    }
}
