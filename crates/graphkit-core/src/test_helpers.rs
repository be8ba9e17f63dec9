//! Shared test helper functions for constructing graph fixtures.
//!
//! This module is compiled only in test builds. Integration tests in
//! `crates/graphkit-core/tests/` define their own local helpers because they
//! link against the non-test library build where this module is not
//! available.
#![allow(clippy::expect_used)]

use crate::constraints::Constraints;
use crate::graph::Graph;
use crate::newtypes::{EdgeId, NodeId};
use crate::structures::Edge;

/// Shorthand for [`NodeId::new`].
pub fn n(raw: u64) -> NodeId {
    NodeId::new(raw)
}

/// Shorthand for [`EdgeId::new`].
pub fn e(raw: u64) -> EdgeId {
    EdgeId::new(raw)
}

/// Builds a graph with nodes `0..node_count` and the given edges, panicking
/// if any edge is rejected.
pub fn graph_with(constraints: Constraints, node_count: u64, edges: &[Edge]) -> Graph {
    let mut graph = Graph::with_nodes(constraints, (0..node_count).map(n));
    for edge in edges {
        graph
            .try_add_edge(*edge)
            .expect("fixture edge must be accepted");
    }
    graph
}

/// Undirected edges `(a, b)` with ids assigned in slice order.
pub fn undirected_edges(pairs: &[(u64, u64)]) -> Vec<Edge> {
    pairs
        .iter()
        .zip(0..)
        .map(|(&(a, b), id)| Edge::undirected(e(id), n(a), n(b)))
        .collect()
}

/// Directed edges `a → b` with ids assigned in slice order.
pub fn directed_edges(pairs: &[(u64, u64)]) -> Vec<Edge> {
    pairs
        .iter()
        .zip(0..)
        .map(|(&(a, b), id)| Edge::directed(e(id), n(a), n(b)))
        .collect()
}

/// Weighted edges `(a, b, w)` with ids assigned in slice order.
pub fn weighted_edges(directed: bool, triples: &[(u64, u64, f64)]) -> Vec<Edge> {
    triples
        .iter()
        .zip(0..)
        .map(|(&(a, b, w), id)| Edge::weighted(e(id), n(a), n(b), directed, w))
        .collect()
}

/// A simple undirected graph over `node_count` nodes.
pub fn undirected(node_count: u64, pairs: &[(u64, u64)]) -> Graph {
    graph_with(
        Constraints::SIMPLE | Constraints::UNDIRECTED,
        node_count,
        &undirected_edges(pairs),
    )
}

/// A simple directed graph over `node_count` nodes.
pub fn directed(node_count: u64, pairs: &[(u64, u64)]) -> Graph {
    graph_with(
        Constraints::SIMPLE | Constraints::DIRECTED,
        node_count,
        &directed_edges(pairs),
    )
}

/// The 5-node weighted complete graph used by the shortest-path and
/// spanning-tree tests.
pub fn weighted_k5() -> Graph {
    graph_with(
        Constraints::SIMPLE | Constraints::UNDIRECTED | Constraints::WEIGHTED,
        5,
        &weighted_edges(
            false,
            &[
                (0, 1, 2.0),
                (0, 2, 2.0),
                (0, 3, 1.0),
                (0, 4, 4.0),
                (1, 2, 5.0),
                (1, 3, 3.0),
                (1, 4, 3.0),
                (2, 3, 2.0),
                (2, 4, 4.0),
                (3, 4, 8.0),
            ],
        ),
    )
}

/// Asserts two floats are equal to within `1e-9`.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
