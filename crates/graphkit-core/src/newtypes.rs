//! Integer handles identifying nodes and edges.
//!
//! Nodes and edges are created by callers and registered with a
//! [`crate::Graph`]; the graph never owns their identity. Handles are plain
//! `u64` wrappers so they are `Copy`, totally ordered and cheap to hash, which
//! lets every adjacency table key on them directly.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a node.
///
/// The same `NodeId` may be a member of several graphs at once (for example a
/// graph and the spanning forest computed from it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Wraps a raw integer identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer identity.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Identity of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Wraps a raw integer identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer identity.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EdgeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Monotonic issuer of fresh node and edge handles.
///
/// Node and edge counters are independent. Callers that restore previously
/// removed entities reuse the old handles and never ask the generator for them.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next_node: u64,
    next_edge: u64,
}

impl IdGenerator {
    /// Creates a generator whose first node and edge handles are both `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a node handle that this generator has never issued before.
    pub fn next_node(&mut self) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        id
    }

    /// Returns an edge handle that this generator has never issued before.
    pub fn next_edge(&mut self) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_display_prefixes_kind() {
        assert_eq!(NodeId::new(7).to_string(), "n7");
        assert_eq!(EdgeId::new(3).to_string(), "e3");
    }

    #[test]
    fn test_generator_issues_distinct_handles() {
        let mut ids = IdGenerator::new();
        let a = ids.next_node();
        let b = ids.next_node();
        let e = ids.next_edge();
        assert_ne!(a, b);
        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(e.get(), 0, "edge counter is independent of node counter");
    }

    #[test]
    fn test_handles_serialize_as_bare_integers() {
        let json = serde_json::to_string(&NodeId::new(42)).expect("serialize");
        assert_eq!(json, "42");
        let back: EdgeId = serde_json::from_str("9").expect("deserialize");
        assert_eq!(back, EdgeId::new(9));
    }
}
