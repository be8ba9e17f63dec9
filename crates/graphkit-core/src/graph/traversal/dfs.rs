//! Depth-first search. Same operations as [`super::bfs`] over a LIFO
//! worklist; [`search`] returns *a* path, not necessarily a shortest one.
use std::collections::BTreeSet;

use super::Lifo;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::newtypes::NodeId;
use crate::path::Path;

/// Every node reachable from `start`, `start` included.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if `start` is not a member.
pub fn explore(
    graph: &Graph,
    start: NodeId,
    follow_directed: bool,
) -> Result<BTreeSet<NodeId>, GraphError> {
    super::explore::<Lifo>(graph, start, follow_directed)
}

/// Union of [`explore`] over `starts`.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if any start is not a member.
pub fn explore_all(
    graph: &Graph,
    starts: impl IntoIterator<Item = NodeId>,
    follow_directed: bool,
) -> Result<BTreeSet<NodeId>, GraphError> {
    super::explore_all::<Lifo>(graph, starts, follow_directed)
}

/// Some path from `start` to `target`, or `None` if there is none.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if either node is not a member.
pub fn search(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    follow_directed: bool,
) -> Result<Option<Path>, GraphError> {
    super::search::<Lifo>(graph, start, target, follow_directed)
}

/// Returns `true` if `target` is reachable from `start`.
///
/// # Errors
///
/// Returns [`GraphError::NodeNotFound`] if either node is not a member.
pub fn connected(
    graph: &Graph,
    start: NodeId,
    target: NodeId,
    follow_directed: bool,
) -> Result<bool, GraphError> {
    super::connected::<Lifo>(graph, start, target, follow_directed)
}
