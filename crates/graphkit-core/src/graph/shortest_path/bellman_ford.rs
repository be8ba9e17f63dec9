//! Bellman-Ford shortest path with negative-cycle detection.
//!
//! Distances are seeded at the destination and relaxed backwards along
//! followable edges, so each node's entry in the next-hop table names the
//! first hop of its shortest route *to* the destination. The forward path is
//! then read off the table starting at `start`.
//!
//! A negative undirected edge is a negative cycle on its own (cross it and
//! come straight back). Those are rejected up front when they lie between
//! start and destination, since the relaxation below would only see them as
//! an endlessly improving pair.
use std::collections::{BTreeMap, BTreeSet};

use super::{Hop, NegativeCycle};
use crate::error::GraphError;
use crate::graph::{Graph, bfs};
use crate::newtypes::NodeId;
use crate::path::Path;
use crate::structures::Edge;

/// Returns a minimum-weight path from `start` to `destination` following
/// edge direction, or `None` if `destination` is unreachable.
///
/// # Errors
///
/// - [`GraphError::NodeNotFound`] if either node is not a member.
/// - [`GraphError::NonFiniteWeight`] if any edge weight is NaN or infinite.
/// - [`GraphError::NegativeCycle`] if a negative cycle lies on some route
///   from `start` to `destination`.
pub fn execute(
    graph: &Graph,
    start: NodeId,
    destination: NodeId,
) -> Result<Option<Path>, GraphError> {
    graph.ensure_members(&[start, destination])?;
    super::ensure_finite_weights(graph)?;
    tracing::trace!(start = %start, destination = %destination, "bellman-ford");

    let negative = negative_undirected_between(graph, start, destination)?;
    if !negative.is_empty() {
        tracing::debug!(edges = negative.len(), "bellman-ford aborted on undirected negative edges");
        return Err(GraphError::NegativeCycle(NegativeCycle::UndirectedEdges(
            negative,
        )));
    }

    if !bfs::connected(graph, start, destination, true)? {
        return Ok(None);
    }

    let hops = followable_hops(graph)?;
    let mut distance: BTreeMap<NodeId, f64> = BTreeMap::from([(destination, 0.0)]);
    let mut next: BTreeMap<NodeId, Hop> = BTreeMap::new();

    for _ in 1..graph.node_count() {
        let mut changed = false;
        for (node, hop) in &hops {
            if let Some(candidate) = relaxed(&distance, *node, hop) {
                distance.insert(*node, candidate);
                next.insert(*node, *hop);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let from_start = bfs::explore(graph, start, true)?;
    for (node, hop) in &hops {
        if relaxed(&distance, *node, hop).is_some() && from_start.contains(node) {
            next.insert(*node, *hop);
            tracing::debug!(witness = %node, "bellman-ford aborted on negative cycle");
            return Err(GraphError::NegativeCycle(NegativeCycle::NextHops {
                next,
                witness: *node,
            }));
        }
    }

    let mut path = Path::new(start);
    while path.end() != destination {
        let current = path.end();
        let hop = next
            .get(&current)
            .filter(|_| path.hops() < graph.node_count())
            .ok_or(GraphError::NoEdgeBetween {
                from: current,
                to: destination,
            })?;
        path.append(hop.edge)?;
    }
    tracing::trace!(hops = path.hops(), length = path.length(), "bellman-ford done");
    Ok(Some(path))
}

/// The improved distance of `node` through `hop`, if it is an improvement.
fn relaxed(distance: &BTreeMap<NodeId, f64>, node: NodeId, hop: &Hop) -> Option<f64> {
    let through = distance.get(&hop.node)? + hop.edge.numeric_weight();
    match distance.get(&node) {
        Some(&known) if known <= through => None,
        Some(_) | None => Some(through),
    }
}

/// Every `(u, u → v)` pair with `v` a followable neighbor of `u`, using the
/// lightest edge between them.
fn followable_hops(graph: &Graph) -> Result<Vec<(NodeId, Hop)>, GraphError> {
    let mut hops = Vec::with_capacity(graph.edge_count());
    for node in graph.nodes() {
        for neighbor in graph.neighbors(node, true)? {
            if let Some(edge) = graph.min_edge_to(node, neighbor, true)? {
                hops.push((
                    node,
                    Hop {
                        node: neighbor,
                        edge: *edge,
                    },
                ));
            }
        }
    }
    Ok(hops)
}

/// Negative undirected edges whose first endpoint is reachable from `start`
/// and can reach `destination`, both ignoring direction.
fn negative_undirected_between(
    graph: &Graph,
    start: NodeId,
    destination: NodeId,
) -> Result<Vec<Edge>, GraphError> {
    let mut candidates = graph
        .iter_edges()
        .filter(|edge| !edge.is_directed() && edge.numeric_weight() < 0.0)
        .peekable();
    if candidates.peek().is_none() {
        return Ok(Vec::new());
    }

    let from_start: BTreeSet<NodeId> = bfs::explore(graph, start, false)?;
    let to_destination: BTreeSet<NodeId> = bfs::explore(graph, destination, false)?;
    Ok(candidates
        .filter(|edge| {
            from_start.contains(&edge.first()) && to_destination.contains(&edge.first())
        })
        .copied()
        .collect())
}
