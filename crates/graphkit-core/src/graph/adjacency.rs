//! Per-node adjacency index.
//!
//! Every member node of a [`Graph`](crate::Graph) owns one [`AdjListData`]. It
//! groups the edge ids incident to the node into exactly one of four places:
//!
//! | edge shape                    | grouping                         |
//! |-------------------------------|----------------------------------|
//! | self-edge                     | `self_edges`                     |
//! | undirected                    | `undirected[other endpoint]`     |
//! | directed, owner is the source | `outgoing[sink]`                 |
//! | directed, owner is the sink   | `incoming[source]`               |
//!
//! A non-self edge is therefore registered twice, once with each endpoint;
//! a self-edge is registered once. Empty neighbor buckets are pruned on
//! removal, so a key present in any map always has at least one edge.
use std::collections::{BTreeMap, BTreeSet};

use crate::error::GraphError;
use crate::newtypes::{EdgeId, NodeId};
use crate::structures::Edge;

type Buckets = BTreeMap<NodeId, BTreeSet<EdgeId>>;

/// Where an edge lives inside one node's adjacency data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    SelfEdge,
    Undirected(NodeId),
    Outgoing(NodeId),
    Incoming(NodeId),
}

/// Neighbor → edges tables for one node.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjListData {
    owner: NodeId,
    undirected: Buckets,
    outgoing: Buckets,
    incoming: Buckets,
    self_edges: BTreeSet<EdgeId>,
}

impl AdjListData {
    /// Creates empty adjacency data for `owner`.
    pub fn new(owner: NodeId) -> Self {
        Self {
            owner,
            undirected: BTreeMap::new(),
            outgoing: BTreeMap::new(),
            incoming: BTreeMap::new(),
            self_edges: BTreeSet::new(),
        }
    }

    /// The node this adjacency data belongs to.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    fn classify(&self, edge: &Edge) -> Result<Slot, GraphError> {
        let other = edge.other_endpoint(self.owner)?;
        Ok(if other == self.owner {
            Slot::SelfEdge
        } else if !edge.is_directed() {
            Slot::Undirected(other)
        } else if edge.source() == self.owner {
            Slot::Outgoing(other)
        } else {
            Slot::Incoming(other)
        })
    }

    /// Returns `true` if `edge` is registered here.
    pub fn has_edge(&self, edge: &Edge) -> bool {
        let id = edge.id();
        match self.classify(edge) {
            Ok(Slot::SelfEdge) => self.self_edges.contains(&id),
            Ok(Slot::Undirected(other)) => bucket_has(&self.undirected, other, id),
            Ok(Slot::Outgoing(other)) => bucket_has(&self.outgoing, other, id),
            Ok(Slot::Incoming(other)) => bucket_has(&self.incoming, other, id),
            Err(_) => false,
        }
    }

    /// Registers `edge` with this node.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidEndpoint`] if the owner is not an endpoint.
    /// - [`GraphError::DuplicateRegistration`] if the edge is already present.
    pub fn add_edge(&mut self, edge: &Edge) -> Result<(), GraphError> {
        let id = edge.id();
        let inserted = match self.classify(edge)? {
            Slot::SelfEdge => self.self_edges.insert(id),
            Slot::Undirected(other) => self.undirected.entry(other).or_default().insert(id),
            Slot::Outgoing(other) => self.outgoing.entry(other).or_default().insert(id),
            Slot::Incoming(other) => self.incoming.entry(other).or_default().insert(id),
        };
        if inserted {
            Ok(())
        } else {
            Err(GraphError::DuplicateRegistration {
                edge: id,
                node: self.owner,
            })
        }
    }

    /// Unregisters `edge` from this node.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidEndpoint`] if the owner is not an endpoint.
    /// - [`GraphError::MissingRegistration`] if the edge is not present.
    pub fn remove_edge(&mut self, edge: &Edge) -> Result<(), GraphError> {
        let id = edge.id();
        let removed = match self.classify(edge)? {
            Slot::SelfEdge => self.self_edges.remove(&id),
            Slot::Undirected(other) => bucket_remove(&mut self.undirected, other, id),
            Slot::Outgoing(other) => bucket_remove(&mut self.outgoing, other, id),
            Slot::Incoming(other) => bucket_remove(&mut self.incoming, other, id),
        };
        if removed {
            Ok(())
        } else {
            Err(GraphError::MissingRegistration {
                edge: id,
                node: self.owner,
            })
        }
    }

    /// Edges to every neighbor, self-edges excluded.
    ///
    /// With `follow_directed`, incoming directed edges are excluded so only
    /// edges that can be crossed away from the owner remain.
    pub fn neighboring_edges(&self, follow_directed: bool) -> Vec<EdgeId> {
        let mut edges: Vec<EdgeId> = self
            .undirected
            .values()
            .chain(self.outgoing.values())
            .flatten()
            .copied()
            .collect();
        if !follow_directed {
            edges.extend(self.incoming.values().flatten().copied());
        }
        edges
    }

    /// Edges joining the owner to `neighbor`.
    ///
    /// Asking for the owner itself yields its self-edges. With
    /// `follow_directed`, incoming directed edges are excluded.
    pub fn edges_to_neighbor(&self, neighbor: NodeId, follow_directed: bool) -> Vec<EdgeId> {
        if neighbor == self.owner {
            return self.self_edges.iter().copied().collect();
        }
        let mut edges: Vec<EdgeId> = Vec::new();
        for buckets in [&self.undirected, &self.outgoing] {
            if let Some(ids) = buckets.get(&neighbor) {
                edges.extend(ids.iter().copied());
            }
        }
        if !follow_directed {
            if let Some(ids) = self.incoming.get(&neighbor) {
                edges.extend(ids.iter().copied());
            }
        }
        edges
    }

    /// The distinct neighbors of the owner, including the owner itself if it
    /// has any self-edge.
    ///
    /// With `follow_directed`, nodes only reachable against an edge's direction
    /// are excluded.
    pub fn neighbors(&self, follow_directed: bool) -> BTreeSet<NodeId> {
        let mut neighbors: BTreeSet<NodeId> = self
            .undirected
            .keys()
            .chain(self.outgoing.keys())
            .copied()
            .collect();
        if !follow_directed {
            neighbors.extend(self.incoming.keys().copied());
        }
        if !self.self_edges.is_empty() {
            neighbors.insert(self.owner);
        }
        neighbors
    }

    /// Undirected edges grouped by neighbor.
    pub fn undirected(&self) -> &BTreeMap<NodeId, BTreeSet<EdgeId>> {
        &self.undirected
    }

    /// Directed edges leaving the owner, grouped by sink.
    pub fn outgoing(&self) -> &BTreeMap<NodeId, BTreeSet<EdgeId>> {
        &self.outgoing
    }

    /// Directed edges entering the owner, grouped by source.
    pub fn incoming(&self) -> &BTreeMap<NodeId, BTreeSet<EdgeId>> {
        &self.incoming
    }

    pub fn self_edges(&self) -> &BTreeSet<EdgeId> {
        &self.self_edges
    }

    /// Number of registered edges, each self-edge counted once.
    pub fn degree(&self) -> usize {
        let bucketed: usize = [&self.undirected, &self.outgoing, &self.incoming]
            .into_iter()
            .flat_map(BTreeMap::values)
            .map(BTreeSet::len)
            .sum();
        bucketed + self.self_edges.len()
    }

    /// Returns `true` if no edge is registered.
    pub fn is_isolated(&self) -> bool {
        self.degree() == 0
    }
}

fn bucket_has(buckets: &Buckets, neighbor: NodeId, id: EdgeId) -> bool {
    buckets.get(&neighbor).is_some_and(|ids| ids.contains(&id))
}

fn bucket_remove(buckets: &mut Buckets, neighbor: NodeId, id: EdgeId) -> bool {
    let Some(ids) = buckets.get_mut(&neighbor) else {
        return false;
    };
    let removed = ids.remove(&id);
    if ids.is_empty() {
        buckets.remove(&neighbor);
    }
    removed
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn n(raw: u64) -> NodeId {
        NodeId::new(raw)
    }

    fn e(raw: u64) -> EdgeId {
        EdgeId::new(raw)
    }

    #[test]
    fn test_undirected_edge_is_symmetric() {
        let edge = Edge::undirected(e(0), n(1), n(2));
        let mut a = AdjListData::new(n(1));
        let mut b = AdjListData::new(n(2));
        a.add_edge(&edge).expect("register with a");
        b.add_edge(&edge).expect("register with b");

        assert_eq!(a.edges_to_neighbor(n(2), true), vec![e(0)]);
        assert_eq!(b.edges_to_neighbor(n(1), true), vec![e(0)]);
        assert!(a.neighbors(true).contains(&n(2)));
        assert!(b.neighbors(true).contains(&n(1)));
    }

    #[test]
    fn test_directed_edge_is_outgoing_at_source_incoming_at_sink() {
        let edge = Edge::directed(e(0), n(1), n(2));
        let mut source = AdjListData::new(n(1));
        let mut sink = AdjListData::new(n(2));
        source.add_edge(&edge).expect("register with source");
        sink.add_edge(&edge).expect("register with sink");

        assert!(source.outgoing().contains_key(&n(2)));
        assert!(source.incoming().is_empty());
        assert!(sink.incoming().contains_key(&n(1)));
        assert!(sink.outgoing().is_empty());

        assert!(sink.neighbors(true).is_empty(), "sink cannot follow the edge");
        assert_eq!(sink.neighbors(false), BTreeSet::from([n(1)]));
        assert!(sink.neighboring_edges(true).is_empty());
        assert_eq!(sink.neighboring_edges(false), vec![e(0)]);
    }

    #[test]
    fn test_self_edge_only_in_self_set() {
        let looped = Edge::undirected(e(7), n(3), n(3));
        let mut adj = AdjListData::new(n(3));
        adj.add_edge(&looped).expect("register");

        assert_eq!(adj.self_edges(), &BTreeSet::from([e(7)]));
        assert!(adj.undirected().is_empty());
        assert!(adj.outgoing().is_empty());
        assert!(adj.incoming().is_empty());
        assert!(adj.neighboring_edges(false).is_empty());
        assert_eq!(adj.neighbors(true), BTreeSet::from([n(3)]));
        assert_eq!(adj.edges_to_neighbor(n(3), true), vec![e(7)]);
        assert_eq!(adj.degree(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let edge = Edge::undirected(e(0), n(1), n(2));
        let mut adj = AdjListData::new(n(1));
        adj.add_edge(&edge).expect("first registration");
        let err = adj.add_edge(&edge).expect_err("second registration");
        assert_eq!(
            err,
            GraphError::DuplicateRegistration {
                edge: e(0),
                node: n(1)
            }
        );
    }

    #[test]
    fn test_missing_registration_fails() {
        let edge = Edge::directed(e(0), n(1), n(2));
        let mut adj = AdjListData::new(n(1));
        let err = adj.remove_edge(&edge).expect_err("never registered");
        assert_eq!(
            err,
            GraphError::MissingRegistration {
                edge: e(0),
                node: n(1)
            }
        );
    }

    #[test]
    fn test_foreign_edge_is_rejected() {
        let edge = Edge::undirected(e(0), n(5), n(6));
        let mut adj = AdjListData::new(n(1));
        assert!(matches!(
            adj.add_edge(&edge),
            Err(GraphError::InvalidEndpoint { .. })
        ));
        assert!(!adj.has_edge(&edge));
    }

    #[test]
    fn test_remove_prunes_empty_buckets() {
        let first = Edge::undirected(e(0), n(1), n(2));
        let second = Edge::undirected(e(1), n(1), n(2));
        let mut adj = AdjListData::new(n(1));
        adj.add_edge(&first).expect("register");
        adj.add_edge(&second).expect("register");
        assert_eq!(adj.edges_to_neighbor(n(2), false).len(), 2);

        adj.remove_edge(&first).expect("remove");
        assert!(adj.neighbors(false).contains(&n(2)));
        adj.remove_edge(&second).expect("remove");
        assert!(adj.neighbors(false).is_empty());
        assert!(adj.is_isolated());
    }

    #[test]
    fn test_edges_to_neighbor_respects_direction() {
        let out = Edge::directed(e(0), n(1), n(2));
        let back = Edge::directed(e(1), n(2), n(1));
        let line = Edge::undirected(e(2), n(1), n(2));
        let mut adj = AdjListData::new(n(1));
        for edge in [&out, &back, &line] {
            adj.add_edge(edge).expect("register");
        }

        let followed = adj.edges_to_neighbor(n(2), true);
        assert_eq!(followed.len(), 2);
        assert!(!followed.contains(&e(1)));
        assert_eq!(adj.edges_to_neighbor(n(2), false).len(), 3);
        assert!(adj.has_edge(&back));
        assert_eq!(adj.degree(), 3);
    }
}
