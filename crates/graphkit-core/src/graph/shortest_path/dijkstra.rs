//! Dijkstra's algorithm over non-negative edge weights.
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use crate::error::GraphError;
use crate::graph::{Graph, bfs};
use crate::newtypes::NodeId;
use crate::path::Path;
use crate::structures::Edge;

/// Priority-queue entry; the heap pops the smallest distance first, lower
/// node id on ties.
#[derive(Debug, Clone, Copy)]
struct QueueItem {
    distance: f64,
    node: NodeId,
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

/// Returns a minimum-weight path from `start` to `destination` following
/// edge direction, or `None` if `destination` is unreachable.
///
/// # Errors
///
/// - [`GraphError::NodeNotFound`] if either node is not a member.
/// - [`GraphError::NonFiniteWeight`] if any edge weight is NaN or infinite.
/// - [`GraphError::NegativeWeight`] if any edge of the graph has a negative
///   weight.
pub fn execute(
    graph: &Graph,
    start: NodeId,
    destination: NodeId,
) -> Result<Option<Path>, GraphError> {
    graph.ensure_members(&[start, destination])?;
    super::ensure_finite_weights(graph)?;
    if let Some(edge) = graph.iter_edges().find(|edge| edge.numeric_weight() < 0.0) {
        tracing::debug!(edge = %edge.id(), weight = edge.numeric_weight(), "dijkstra aborted");
        return Err(GraphError::NegativeWeight {
            edge: edge.id(),
            weight: edge.numeric_weight(),
        });
    }
    tracing::trace!(start = %start, destination = %destination, "dijkstra");

    if start == destination {
        return Ok(Some(Path::new(start)));
    }
    if !bfs::explore(graph, start, true)?.contains(&destination) {
        return Ok(None);
    }

    let mut distance: BTreeMap<NodeId, f64> = BTreeMap::from([(start, 0.0)]);
    let mut previous: BTreeMap<NodeId, Edge> = BTreeMap::new();
    let mut settled: BTreeSet<NodeId> = BTreeSet::new();
    let mut queue = BinaryHeap::from([QueueItem {
        distance: 0.0,
        node: start,
    }]);

    while let Some(QueueItem { distance: d, node }) = queue.pop() {
        if !settled.insert(node) {
            continue;
        }
        if node == destination {
            break;
        }
        for neighbor in graph.neighbors(node, true)? {
            if settled.contains(&neighbor) {
                continue;
            }
            let Some(edge) = graph.min_edge_to(node, neighbor, true)? else {
                continue;
            };
            let candidate = d + edge.numeric_weight();
            let improves = distance
                .get(&neighbor)
                .is_none_or(|&known| candidate < known);
            if improves {
                distance.insert(neighbor, candidate);
                previous.insert(neighbor, *edge);
                queue.push(QueueItem {
                    distance: candidate,
                    node: neighbor,
                });
            }
        }
    }

    let mut path = Path::new(destination);
    while path.start() != start {
        let current = path.start();
        let edge = previous.get(&current).ok_or(GraphError::NoEdgeBetween {
            from: start,
            to: current,
        })?;
        path.prepend(*edge)?;
    }
    tracing::trace!(hops = path.hops(), length = path.length(), "dijkstra done");
    Ok(Some(path))
}
