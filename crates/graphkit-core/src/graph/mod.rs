//! The constrained graph container and the algorithms that run over it.
//!
//! A [`Graph`] owns three indexes, kept consistent by every mutation:
//!
//! - one [`AdjListData`] per member node (the arena; nodes are plain
//!   [`NodeId`] handles into it);
//! - the edge arena, `EdgeId → Edge`;
//! - the edge-group map, `UnorderedPair<NodeId> → [EdgeId]`, listing every
//!   edge between two nodes in insertion order regardless of direction.
//!
//! All collections are ordered maps and sets, so every iteration, and hence
//! every algorithm result, is deterministic for a given sequence of
//! mutations.
//!
//! # Algorithms
//!
//! - [`traversal`]: BFS and DFS `explore` / `explore_all` / `search` /
//!   `connected`.
//! - [`shortest_path`]: Dijkstra and Bellman-Ford.
//! - [`kruskal`]: minimum spanning forest.
//! - [`cycles`]: cycle detection over undirected, directed and mixed graphs.
//!
//! Algorithms borrow the graph immutably; only the methods on [`Graph`]
//! mutate it.
pub mod adjacency;
pub mod cycles;
pub mod kruskal;
pub mod shortest_path;
pub mod traversal;

pub use adjacency::AdjListData;
pub use traversal::{bfs, dfs};

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::constraints::Constraints;
use crate::error::{ConstraintViolation, GraphError};
use crate::newtypes::{EdgeId, NodeId};
use crate::pair::UnorderedPair;
use crate::structures::Edge;

/// Everything [`Graph::remove_node`] took out of the graph.
///
/// Passing it back to [`Graph::restore`] re-inserts the node and its edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRemoval {
    /// The removed node.
    pub node: NodeId,
    /// Every edge that touched the node, grouped by endpoint pair in the
    /// order they were inserted.
    pub edge_groups: BTreeMap<UnorderedPair<NodeId>, Vec<Edge>>,
}

impl NodeRemoval {
    /// Total number of removed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_groups.values().map(Vec::len).sum()
    }

    /// The removed edges, group by group.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_groups.values().flatten()
    }
}

/// An in-memory graph whose accepted edges are governed by [`Constraints`].
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    constraints: Constraints,
    nodes: BTreeMap<NodeId, AdjListData>,
    edges: BTreeMap<EdgeId, Edge>,
    groups: BTreeMap<UnorderedPair<NodeId>, Vec<EdgeId>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(Constraints::default())
    }
}

impl Graph {
    /// Creates an empty graph. Contradictory constraint sets are normalised
    /// (see [`Constraints::normalized`]).
    pub fn new(constraints: Constraints) -> Self {
        Self {
            constraints: constraints.normalized(),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            groups: BTreeMap::new(),
        }
    }

    /// Creates an empty graph, rejecting contradictory constraint sets.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidConstraints`] if `constraints` fails
    /// [`Constraints::validate`].
    pub fn try_new(constraints: Constraints) -> Result<Self, GraphError> {
        constraints.validate().map(Self::new)
    }

    /// Creates a graph holding `nodes` and no edges.
    pub fn with_nodes(constraints: Constraints, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut graph = Self::new(constraints);
        graph.add_nodes(nodes);
        graph
    }

    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Returns `true` if every bit of `flag` is set on this graph.
    pub fn has_constraint(&self, flag: Constraints) -> bool {
        self.constraints.contains(flag)
    }

    // -----------------------------------------------------------------------
    // Nodes
    // -----------------------------------------------------------------------

    /// Adds `node`. Returns `false` if it was already a member.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, AdjListData::new(node));
        true
    }

    /// Adds every node in `nodes`, returning how many were new.
    pub fn add_nodes(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> usize {
        nodes
            .into_iter()
            .filter(|&node| self.add_node(node))
            .count()
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Member nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the adjacency data of `node`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` is not a member.
    pub fn adj_list_of(&self, node: NodeId) -> Result<&AdjListData, GraphError> {
        self.nodes.get(&node).ok_or(GraphError::NodeNotFound(node))
    }

    /// Returns `Ok(())` if every node in `nodes` is a member.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] for the first non-member.
    pub fn ensure_members(&self, nodes: &[NodeId]) -> Result<(), GraphError> {
        match nodes.iter().find(|node| !self.contains_node(**node)) {
            Some(&missing) => Err(GraphError::NodeNotFound(missing)),
            None => Ok(()),
        }
    }

    /// Removes `node` and every edge touching it.
    ///
    /// Nothing is mutated unless every incident edge is still registered with
    /// its other endpoint.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`] if `node` is not a member.
    /// - [`GraphError::MissingRegistration`] if a neighbor's adjacency list
    ///   has lost one of the incident edges.
    pub fn remove_node(&mut self, node: NodeId) -> Result<NodeRemoval, GraphError> {
        let adj = self.nodes.get(&node).ok_or(GraphError::NodeNotFound(node))?;
        let neighbors = adj.neighbors(false);

        for &neighbor in &neighbors {
            if neighbor == node {
                continue;
            }
            let Some(other) = self.nodes.get(&neighbor) else {
                continue;
            };
            let key = UnorderedPair::new(node, neighbor);
            let group = self.groups.get(&key).map(Vec::as_slice).unwrap_or_default();
            for id in group {
                let Some(edge) = self.edges.get(id) else {
                    continue;
                };
                if !other.has_edge(edge) {
                    return Err(GraphError::MissingRegistration {
                        edge: *id,
                        node: neighbor,
                    });
                }
            }
        }

        self.nodes.remove(&node);
        let mut edge_groups = BTreeMap::new();
        for neighbor in neighbors {
            let key = UnorderedPair::new(node, neighbor);
            let Some(ids) = self.groups.remove(&key) else {
                continue;
            };
            let mut removed = Vec::with_capacity(ids.len());
            for id in ids {
                let Some(edge) = self.edges.remove(&id) else {
                    continue;
                };
                if neighbor != node {
                    if let Some(other) = self.nodes.get_mut(&neighbor) {
                        // Registration was checked above.
                        other.remove_edge(&edge).ok();
                    }
                }
                removed.push(edge);
            }
            edge_groups.insert(key, removed);
        }

        let removal = NodeRemoval { node, edge_groups };
        tracing::debug!(
            node = %node,
            edges = removal.edge_count(),
            "removed node"
        );
        Ok(removal)
    }

    /// Re-inserts a node and the edges returned by [`Graph::remove_node`].
    ///
    /// Either the whole removal is restored or the graph is left unchanged.
    ///
    /// # Errors
    ///
    /// Fails with the first error [`Graph::try_add_edge`] reports for one of
    /// the removed edges, e.g. when its other endpoint has since been removed
    /// or a new edge now conflicts with it.
    pub fn restore(&mut self, removal: NodeRemoval) -> Result<(), GraphError> {
        let added_node = self.add_node(removal.node);
        let mut restored: Vec<EdgeId> = Vec::with_capacity(removal.edge_count());
        for edge in removal.edges() {
            if let Err(err) = self.try_add_edge(*edge) {
                for id in restored.into_iter().rev() {
                    self.remove_edge(id).ok();
                }
                if added_node {
                    self.nodes.remove(&removal.node);
                }
                return Err(err);
            }
            restored.push(edge.id());
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Edges
    // -----------------------------------------------------------------------

    /// Adds `edge` if the graph's constraints allow it. Returns `false`, and
    /// leaves the graph untouched, otherwise.
    ///
    /// See [`Graph::try_add_edge`] for the reasons an edge is rejected.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        self.try_add_edge(edge).is_ok()
    }

    /// Adds `edge`, reporting why it was rejected.
    ///
    /// Checks run in this order; nothing is mutated on failure.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NodeNotFound`] if an endpoint is not a member.
    /// - [`GraphError::DuplicateEdge`] if an edge with the same id exists.
    /// - [`GraphError::ConstraintViolation`] if the edge is a self-edge in a
    ///   simple graph, its direction is not allowed, or it would be parallel
    ///   to an existing edge in a simple graph.
    pub fn try_add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        let result = self.check_edge(&edge);
        if let Err(err) = &result {
            tracing::debug!(edge = %edge.id(), reason = %err, "edge rejected");
        }
        result?;

        let (first, second) = (edge.first(), edge.second());
        self.adj_mut(first)?.add_edge(&edge)?;
        if first != second {
            self.adj_mut(second)?.add_edge(&edge)?;
        }
        self.groups.entry(edge.key()).or_default().push(edge.id());
        self.edges.insert(edge.id(), edge);
        Ok(())
    }

    fn check_edge(&self, edge: &Edge) -> Result<(), GraphError> {
        self.ensure_members(&[edge.first(), edge.second()])?;
        if self.edges.contains_key(&edge.id()) {
            return Err(GraphError::DuplicateEdge(edge.id()));
        }

        let violation = if edge.is_self_edge() && !self.constraints.is_multigraph() {
            Some(ConstraintViolation::SelfEdge)
        } else if edge.is_directed() && !self.constraints.allows_directed() {
            Some(ConstraintViolation::DirectedEdge)
        } else if !edge.is_directed() && !self.constraints.allows_undirected() {
            Some(ConstraintViolation::UndirectedEdge)
        } else if !self.constraints.is_multigraph() && self.has_parallel(edge) {
            Some(ConstraintViolation::ParallelEdge)
        } else {
            None
        };
        match violation {
            Some(violation) => Err(GraphError::ConstraintViolation {
                edge: edge.id(),
                violation,
            }),
            None => Ok(()),
        }
    }

    /// An undirected edge is parallel to anything between the same pair; a
    /// directed edge is parallel to an undirected one or a directed one with
    /// the same source and sink. Antiparallel directed edges are not parallel.
    fn has_parallel(&self, edge: &Edge) -> bool {
        self.edges_between(edge.first(), edge.second())
            .any(|existing| {
                !edge.is_directed()
                    || !existing.is_directed()
                    || existing.endpoints() == edge.endpoints()
            })
    }

    fn adj_mut(&mut self, node: NodeId) -> Result<&mut AdjListData, GraphError> {
        self.nodes
            .get_mut(&node)
            .ok_or(GraphError::NodeNotFound(node))
    }

    /// Removes and returns the edge with id `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgeNotFound`] if no such edge is a member.
    pub fn remove_edge(&mut self, id: EdgeId) -> Result<Edge, GraphError> {
        let edge = *self.edges.get(&id).ok_or(GraphError::EdgeNotFound(id))?;
        let (first, second) = (edge.first(), edge.second());
        self.adj_mut(first)?.remove_edge(&edge)?;
        if first != second {
            self.adj_mut(second)?.remove_edge(&edge)?;
        }

        let key = edge.key();
        if let Some(ids) = self.groups.get_mut(&key) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.groups.remove(&key);
            }
        }
        self.edges.remove(&id);
        Ok(edge)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The edge-group map: every endpoint pair with at least one edge, and
    /// that pair's edge ids in insertion order.
    pub fn edges(&self) -> &BTreeMap<UnorderedPair<NodeId>, Vec<EdgeId>> {
        &self.groups
    }

    /// Every edge in ascending id order.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Every edge between `a` and `b`, in either direction, in insertion
    /// order. For `a == b` these are the self-edges of `a`.
    pub fn edges_between(&self, a: NodeId, b: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.groups
            .get(&UnorderedPair::new(a, b))
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id))
    }

    /// Every edge in one group, resolved from the arena.
    pub fn group(&self, key: &UnorderedPair<NodeId>) -> Vec<&Edge> {
        self.groups
            .get(key)
            .into_iter()
            .flatten()
            .filter_map(|id| self.edges.get(id))
            .collect()
    }

    /// Edges leading from `from` to `to`. With `follow_directed`, directed
    /// edges pointing from `to` to `from` are excluded.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `from` is not a member.
    pub fn edges_to(
        &self,
        from: NodeId,
        to: NodeId,
        follow_directed: bool,
    ) -> Result<Vec<&Edge>, GraphError> {
        let ids = self.adj_list_of(from)?.edges_to_neighbor(to, follow_directed);
        Ok(ids.iter().filter_map(|id| self.edges.get(id)).collect())
    }

    /// The lightest edge leading from `from` to `to`, the first one found on
    /// ties, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `from` is not a member.
    pub fn min_edge_to(
        &self,
        from: NodeId,
        to: NodeId,
        follow_directed: bool,
    ) -> Result<Option<&Edge>, GraphError> {
        Ok(self
            .edges_to(from, to, follow_directed)?
            .into_iter()
            .min_by(|a, b| a.numeric_weight().total_cmp(&b.numeric_weight())))
    }

    /// The distinct neighbors of `node`; see [`AdjListData::neighbors`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if `node` is not a member.
    pub fn neighbors(
        &self,
        node: NodeId,
        follow_directed: bool,
    ) -> Result<BTreeSet<NodeId>, GraphError> {
        Ok(self.adj_list_of(node)?.neighbors(follow_directed))
    }
}
